//! Encoded size of a node, computed without writing anything.

use crate::{
    codec::EncodeSize,
    node::{Node, Table},
    tag::{Tag, HEADER_SIZE, MARKERS_SIZE},
};

/// Size of a sequence node (array or string) holding `count` elements of `tag`.
#[inline]
pub(crate) fn sequence_size(tag: Tag, count: usize) -> usize {
    let element = tag.element_size().unwrap_or(0);
    HEADER_SIZE + count * element + MARKERS_SIZE
}

/// Size of a table key, which is encoded exactly like a string node.
#[inline]
pub(crate) fn key_size(key: &[u8]) -> usize {
    sequence_size(Tag::String, key.len())
}

impl EncodeSize for Table {
    fn encode_size(&self) -> usize {
        MARKERS_SIZE
            + self
                .iter()
                .map(|(key, value)| key_size(key) + value.encode_size())
                .sum::<usize>()
    }
}

impl EncodeSize for Node {
    fn encode_size(&self) -> usize {
        let tag = self.tag();
        match self {
            Node::I32(_)
            | Node::I64(_)
            | Node::F32(_)
            | Node::F64(_)
            | Node::I8(_)
            | Node::U32(_)
            | Node::U64(_)
            | Node::U8(_)
            | Node::Char(_) => tag.fixed_size() + MARKERS_SIZE,
            Node::I32Array(v) => sequence_size(tag, v.len()),
            Node::I64Array(v) => sequence_size(tag, v.len()),
            Node::F32Array(v) => sequence_size(tag, v.len()),
            Node::F64Array(v) => sequence_size(tag, v.len()),
            Node::I8Array(v) => sequence_size(tag, v.len()),
            Node::U32Array(v) => sequence_size(tag, v.len()),
            Node::U64Array(v) => sequence_size(tag, v.len()),
            Node::U8Array(v) => sequence_size(tag, v.len()),
            Node::String(s) => sequence_size(tag, s.len()),
            Node::Table(t) => t.encode_size(),
        }
    }
}

/// Calculates the total size of the given node in bytes.
pub fn size(node: &Node) -> usize {
    node.encode_size()
}
