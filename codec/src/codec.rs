//! Core codec traits

use crate::{de::Reader, error::Error};
use bytes::{BufMut, BytesMut};

/// Trait for types that can report their encoded size without encoding.
pub trait EncodeSize {
    /// Returns the encoded size of this value (in bytes).
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that can be read (decoded) from a [Reader].
pub trait Read: Sized {
    /// Limits applied while reading (for example, the maximum nesting depth).
    type Cfg: Clone + Send + Sync + 'static;

    /// Reads a value from the reader using the provided configuration `cfg`, consuming the
    /// necessary bytes.
    fn read_cfg(reader: &mut Reader<'_>, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer sized with [EncodeSize::encode_size].
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Extension trait providing an ergonomic read method for types with a default config.
pub trait ReadExt: Read<Cfg: Default> {
    /// Reads a value using the default config.
    fn read(reader: &mut Reader<'_>) -> Result<Self, Error> {
        Self::read_cfg(reader, &Self::Cfg::default())
    }
}

impl<T: Read<Cfg: Default>> ReadExt for T {}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from `bytes`, returning [Error::ExtraData] if any bytes are left over.
    fn decode_cfg(bytes: &[u8], cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut reader = Reader::new(bytes);
        let result = Self::read_cfg(&mut reader, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = reader.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Extension trait providing an ergonomic decode method for types with a default config.
pub trait DecodeExt: Decode<Cfg: Default> {
    /// Decodes a value using the default config.
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Self::decode_cfg(bytes, &Self::Cfg::default())
    }
}

impl<T: Decode<Cfg: Default>> DecodeExt for T {}
