//! Serialization of nodes into a pre-sized buffer.

use crate::{
    codec::{EncodeSize, Write},
    node::{Node, Table},
    primitives::{put_slice, Element},
    tag::Tag,
    Error,
};
use bytes::BufMut;

/// Writes the count header and payload of an array.
#[inline]
fn write_array<T: Element>(values: &[T], buf: &mut impl BufMut) {
    (values.len() as u64).put(buf);
    put_slice(values, buf);
}

/// Writes the count header and payload of a string (or a table key).
#[inline]
fn write_bytes(bytes: &[u8], buf: &mut impl BufMut) {
    (bytes.len() as u64).put(buf);
    buf.put_slice(bytes);
}

/// Writes a table key as a complete string node.
#[inline]
fn write_key(key: &[u8], buf: &mut impl BufMut) {
    buf.put_u8(Tag::String.open());
    write_bytes(key, buf);
    buf.put_u8(Tag::String.close());
}

impl Write for Table {
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(Tag::Table.open());
        for (key, value) in self.iter() {
            write_key(key, buf);
            value.write(buf);
        }
        buf.put_u8(Tag::Table.close());
    }
}

impl Write for Node {
    fn write(&self, buf: &mut impl BufMut) {
        // Tables write their own markers
        if let Node::Table(table) = self {
            table.write(buf);
            return;
        }

        let tag = self.tag();
        buf.put_u8(tag.open());
        match self {
            Node::I32(v) => v.put(buf),
            Node::I64(v) => v.put(buf),
            Node::F32(v) => v.put(buf),
            Node::F64(v) => v.put(buf),
            Node::I8(v) => v.put(buf),
            Node::U32(v) => v.put(buf),
            Node::U64(v) => v.put(buf),
            Node::U8(v) | Node::Char(v) => v.put(buf),
            Node::I32Array(v) => write_array(v, buf),
            Node::I64Array(v) => write_array(v, buf),
            Node::F32Array(v) => write_array(v, buf),
            Node::F64Array(v) => write_array(v, buf),
            Node::I8Array(v) => write_array(v, buf),
            Node::U32Array(v) => write_array(v, buf),
            Node::U64Array(v) => write_array(v, buf),
            Node::U8Array(v) | Node::String(v) => write_bytes(v, buf),
            Node::Table(_) => {}
        }
        buf.put_u8(tag.close());
    }
}

/// Writes `node` into `bytes` starting at `cursor`, advancing `cursor` by exactly the encoded
/// size of the node.
///
/// Returns [Error::BufferTooSmall] (and writes nothing) if fewer than [crate::size()] bytes are
/// available after `cursor`.
pub fn serialize(node: &Node, bytes: &mut [u8], cursor: &mut usize) -> Result<(), Error> {
    let size = node.encode_size();
    let available = bytes.len().saturating_sub(*cursor);
    if available < size {
        return Err(Error::BufferTooSmall {
            needed: size,
            found: available,
        });
    }

    let mut window = &mut bytes[*cursor..*cursor + size];
    node.write(&mut window);
    debug_assert!(window.is_empty(), "write() did not write expected bytes");
    *cursor += size;
    Ok(())
}
