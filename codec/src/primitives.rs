//! Fixed-width element encoding.
//!
//! Every scalar value and every array element is written in little-endian byte order,
//! independent of the host. Array counts and string lengths are written as `u64`.

use crate::Error;
use bytes::{Buf, BufMut};

/// Returns an error if the buffer holds fewer than `len` bytes.
#[inline]
pub fn at_least<B: Buf>(buf: &B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// A fixed-width value that can appear as a scalar node or as an array element.
pub trait Element: Copy + Sized {
    /// Number of bytes occupied on the wire.
    const SIZE: usize;

    /// Writes the value.
    ///
    /// Panics if the buffer doesn't have enough capacity.
    fn put(self, buf: &mut impl BufMut);

    /// Reads a value without checking the remaining length.
    ///
    /// Panics if fewer than [Element::SIZE] bytes remain.
    fn get(buf: &mut impl Buf) -> Self;

    /// Reads a value, returning an error if the buffer is too short.
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        at_least(buf, Self::SIZE)?;
        Ok(Self::get(buf))
    }
}

macro_rules! impl_element {
    ($type:ty, $get:ident, $put:ident) => {
        impl Element for $type {
            const SIZE: usize = std::mem::size_of::<$type>();

            #[inline]
            fn put(self, buf: &mut impl BufMut) {
                buf.$put(self);
            }

            #[inline]
            fn get(buf: &mut impl Buf) -> Self {
                buf.$get()
            }
        }
    };
}

impl_element!(u8, get_u8, put_u8);
impl_element!(i8, get_i8, put_i8);
impl_element!(u32, get_u32_le, put_u32_le);
impl_element!(i32, get_i32_le, put_i32_le);
impl_element!(u64, get_u64_le, put_u64_le);
impl_element!(i64, get_i64_le, put_i64_le);
impl_element!(f32, get_f32_le, put_f32_le);
impl_element!(f64, get_f64_le, put_f64_le);

/// Writes every element of `values` in order.
#[inline]
pub fn put_slice<T: Element>(values: &[T], buf: &mut impl BufMut) {
    for value in values {
        value.put(buf);
    }
}

/// Reads `count` elements.
///
/// The caller MUST ensure `count * T::SIZE` bytes remain.
#[inline]
pub fn get_vec<T: Element>(buf: &mut impl Buf, count: usize) -> Vec<T> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(T::get(buf));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use paste::paste;

    macro_rules! impl_element_test {
        ($type:ty, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values {
                        let mut buf = BytesMut::new();
                        value.put(&mut buf);
                        assert_eq!(buf.len(), $size);
                        assert_eq!(<$type as Element>::SIZE, $size);
                        assert_eq!(&buf[..], &value.to_le_bytes()[..]);

                        let mut reader = &buf[..];
                        let decoded = <$type>::read(&mut reader).unwrap();
                        assert_eq!(value, decoded);
                        assert!(reader.is_empty());
                    }
                }
            }
        };
    }
    impl_element_test!(u8, 1);
    impl_element_test!(i8, 1);
    impl_element_test!(u32, 4);
    impl_element_test!(i32, 4);
    impl_element_test!(u64, 8);
    impl_element_test!(i64, 8);
    impl_element_test!(f32, 4);
    impl_element_test!(f64, 8);

    #[test]
    fn test_endianness() {
        let mut buf = BytesMut::new();
        42i32.put(&mut buf);
        assert_eq!(&buf[..], &[42, 0, 0, 0]);

        let mut buf = BytesMut::new();
        0x0102030405060708u64.put(&mut buf);
        assert_eq!(&buf[..], &[8, 7, 6, 5, 4, 3, 2, 1]);

        let mut buf = BytesMut::new();
        1.0f32.put(&mut buf);
        assert_eq!(&buf[..], &[0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn test_insufficient_buffer() {
        let mut reader: &[u8] = &[0x01, 0x02];
        assert!(matches!(u32::read(&mut reader), Err(Error::EndOfBuffer)));
        assert!(matches!(i64::read(&mut reader), Err(Error::EndOfBuffer)));
        assert_eq!(u8::read(&mut reader).unwrap(), 1);
    }

    #[test]
    fn test_slices() {
        let values = [-1i32, 0, i32::MAX];
        let mut buf = BytesMut::new();
        put_slice(&values, &mut buf);
        assert_eq!(buf.len(), 3 * 4);

        let mut reader = &buf[..];
        let decoded: Vec<i32> = get_vec(&mut reader, 3);
        assert_eq!(decoded, values);
    }
}
