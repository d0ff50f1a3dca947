//! Deserialization of nodes from a byte buffer.
//!
//! Decoding walks the buffer with a [Reader], validating each open tag, bounding every payload
//! against the bytes that remain (twice for arrays: once for the count header and once for the
//! declared payload) and checking that every node ends with the close tag of the variant that
//! opened it.

use crate::{
    codec::Read,
    config::Config,
    error::EntryPart,
    node::{Node, Table},
    primitives::{get_vec, Element},
    tag::{Marker, Tag},
    Error,
};
use bytes::Buf;
use tracing::trace;

/// A cursor over an immutable byte buffer.
///
/// Offsets reported in errors are relative to the start of the buffer the reader was created
/// from.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// Creates a reader positioned at `offset` (clamped to the end of `bytes`).
    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        Self {
            buf: bytes.get(offset..).unwrap_or_default(),
            len: bytes.len(),
        }
    }

    /// Position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.len - self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.buf.first().copied()
    }

    fn ensure(&self, tag: Tag, expected: usize) -> Result<(), Error> {
        let found = self.remaining();
        if found < expected {
            return Err(Error::Truncated {
                tag,
                offset: self.offset(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

/// Reads one node. `depth` is the depth of the node being read (the root is 1).
fn read_node(reader: &mut Reader<'_>, cfg: &Config, depth: usize) -> Result<Node, Error> {
    let offset = reader.offset();
    if depth > cfg.max_depth {
        return Err(Error::DepthExceeded {
            max: cfg.max_depth,
            offset,
        });
    }

    // Read the open tag
    let byte = <u8 as Element>::read(&mut reader.buf)?;
    let tag = Tag::from_open(byte).ok_or(Error::MalformedTag { tag: byte, offset })?;

    // First pass: the fixed part and at least one more byte must be present
    reader.ensure(tag, tag.fixed_size() + 1)?;

    // Second pass: arrays and strings must also fit their declared payload
    let count = match tag.element_size() {
        Some(element) => {
            let declared = u64::get(&mut reader.buf);
            let count = usize::try_from(declared).unwrap_or(usize::MAX);
            reader.ensure(tag, count.saturating_mul(element).saturating_add(1))?;
            count
        }
        None => 0,
    };

    let node = match tag {
        Tag::I32 => Node::I32(i32::get(&mut reader.buf)),
        Tag::I64 => Node::I64(i64::get(&mut reader.buf)),
        Tag::F32 => Node::F32(f32::get(&mut reader.buf)),
        Tag::F64 => Node::F64(f64::get(&mut reader.buf)),
        Tag::I8 => Node::I8(i8::get(&mut reader.buf)),
        Tag::U32 => Node::U32(u32::get(&mut reader.buf)),
        Tag::U64 => Node::U64(u64::get(&mut reader.buf)),
        Tag::U8 => Node::U8(u8::get(&mut reader.buf)),
        Tag::Char => Node::Char(u8::get(&mut reader.buf)),
        Tag::I32Array => Node::I32Array(get_vec(&mut reader.buf, count)),
        Tag::I64Array => Node::I64Array(get_vec(&mut reader.buf, count)),
        Tag::F32Array => Node::F32Array(get_vec(&mut reader.buf, count)),
        Tag::F64Array => Node::F64Array(get_vec(&mut reader.buf, count)),
        Tag::I8Array => Node::I8Array(get_vec(&mut reader.buf, count)),
        Tag::U32Array => Node::U32Array(get_vec(&mut reader.buf, count)),
        Tag::U64Array => Node::U64Array(get_vec(&mut reader.buf, count)),
        Tag::U8Array => Node::U8Array(read_bytes(reader, count)),
        Tag::String => Node::String(read_bytes(reader, count)),
        Tag::Table => Node::Table(read_entries(reader, cfg, depth)?),
    };

    // Verify the close tag
    let close_offset = reader.offset();
    reader.ensure(tag, 1)?;
    let found = reader.buf.get_u8();
    if found != tag.close() {
        return Err(Error::CloseTagMismatch {
            expected: tag,
            found: Marker(found),
            offset: close_offset,
        });
    }

    Ok(node)
}

/// Copies `count` raw bytes (already bounds-checked).
fn read_bytes(reader: &mut Reader<'_>, count: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; count];
    reader.buf.copy_to_slice(&mut bytes);
    bytes
}

/// Reads table entries up to (but not including) the table's close tag.
///
/// The entries decoded so far are owned by `table`; if any entry fails, returning the error
/// drops them.
fn read_entries(reader: &mut Reader<'_>, cfg: &Config, depth: usize) -> Result<Table, Error> {
    let mut table = Table::new();
    loop {
        let offset = reader.offset();
        let byte = match reader.peek() {
            Some(byte) => byte,
            None => {
                return Err(Error::Truncated {
                    tag: Tag::Table,
                    offset,
                    expected: 1,
                    found: 0,
                })
            }
        };
        if byte == Tag::Table.close() {
            return Ok(table);
        }

        // Keys must be strings
        if byte != Tag::String.open() {
            let found = Marker(byte);
            if found.closes().is_some() {
                return Err(Error::CloseTagMismatch {
                    expected: Tag::Table,
                    found,
                    offset,
                });
            }
            return Err(Error::InvalidTableKey { found, offset });
        }

        let index = table.len();
        let key = match read_node(reader, cfg, depth + 1) {
            Ok(Node::String(key)) => key,
            // Unreachable: the peeked byte opens a string
            Ok(other) => {
                return Err(Error::InvalidTableKey {
                    found: Marker(other.tag().open()),
                    offset,
                })
            }
            Err(err) => {
                trace!(index, offset, "failed to read table key");
                return Err(Error::nested(index, EntryPart::Key, offset, err));
            }
        };

        let value_offset = reader.offset();
        let value = if reader.is_empty() {
            Err(Error::Truncated {
                tag: Tag::Table,
                offset: value_offset,
                expected: 1,
                found: 0,
            })
        } else {
            read_node(reader, cfg, depth + 1)
        };
        let value = value.map_err(|err| {
            trace!(index, offset = value_offset, "failed to read table value");
            Error::nested(index, EntryPart::Value, value_offset, err)
        })?;

        table.push(key, value);
    }
}

impl Read for Node {
    type Cfg = Config;

    /// Reads one node, returning [Error::EndOfBuffer] if the reader is already exhausted.
    fn read_cfg(reader: &mut Reader<'_>, cfg: &Config) -> Result<Self, Error> {
        read_node(reader, cfg, 1)
    }
}

/// Deserializes a single node from `bytes` starting at `cursor`, using the default [Config].
///
/// Returns `Ok(None)` if `cursor` is at or past the end of `bytes`. On success, `cursor` is
/// advanced past the node. On failure, `cursor` is left unchanged and no part of the tree is
/// returned.
pub fn deserialize(bytes: &[u8], cursor: &mut usize) -> Result<Option<Node>, Error> {
    deserialize_cfg(bytes, cursor, &Config::default())
}

/// Like [deserialize], with explicit decoding limits.
pub fn deserialize_cfg(
    bytes: &[u8],
    cursor: &mut usize,
    cfg: &Config,
) -> Result<Option<Node>, Error> {
    if *cursor >= bytes.len() {
        return Ok(None);
    }

    let mut reader = Reader::at(bytes, *cursor);
    let node = Node::read_cfg(&mut reader, cfg)?;
    *cursor = reader.offset();
    Ok(Some(node))
}
