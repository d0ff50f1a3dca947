//! Wire tags identifying each node variant.
//!
//! Every encoded node is bracketed by a one-byte open tag and a one-byte close tag. Open tags
//! occupy `1..=19`; the close tag of a variant is the two's-complement negation of its open tag
//! (`256 - open`), so close tags occupy `237..=255` and never collide with an open tag.
//!
//! ```text
//! +------+-------------------+-------+
//! | open |      payload      | close |
//! +------+-------------------+-------+
//! ```

use std::fmt;

/// Size of the element count written before every array and string payload.
pub const HEADER_SIZE: usize = 8;

/// Combined size of the open and close tags of a node.
pub const MARKERS_SIZE: usize = 2;

/// The variant of a node, as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    I32 = 1,
    I64 = 2,
    F32 = 3,
    F64 = 4,
    I8 = 5,
    U32 = 6,
    U64 = 7,
    U8 = 8,
    Char = 9,
    I32Array = 10,
    I64Array = 11,
    F32Array = 12,
    F64Array = 13,
    I8Array = 14,
    U32Array = 15,
    U64Array = 16,
    U8Array = 17,
    String = 18,
    Table = 19,
}

impl Tag {
    /// Every tag, ordered by open byte.
    pub const ALL: [Tag; 19] = [
        Tag::I32,
        Tag::I64,
        Tag::F32,
        Tag::F64,
        Tag::I8,
        Tag::U32,
        Tag::U64,
        Tag::U8,
        Tag::Char,
        Tag::I32Array,
        Tag::I64Array,
        Tag::F32Array,
        Tag::F64Array,
        Tag::I8Array,
        Tag::U32Array,
        Tag::U64Array,
        Tag::U8Array,
        Tag::String,
        Tag::Table,
    ];

    /// Distance between an array tag and the scalar tag of its elements.
    const ELEMENT_OFFSET: u8 = 9;

    /// Resolves an open tag byte.
    pub fn from_open(byte: u8) -> Option<Tag> {
        match byte {
            1..=19 => Some(Self::ALL[usize::from(byte - 1)]),
            _ => None,
        }
    }

    /// Resolves a close tag byte.
    pub fn from_close(byte: u8) -> Option<Tag> {
        Self::from_open(byte.wrapping_neg())
    }

    /// The byte that opens a node of this variant.
    pub const fn open(self) -> u8 {
        self as u8
    }

    /// The byte that closes a node of this variant.
    pub const fn close(self) -> u8 {
        (self as u8).wrapping_neg()
    }

    pub const fn is_scalar(self) -> bool {
        (self as u8) < Tag::I32Array as u8
    }

    pub const fn is_array(self) -> bool {
        (self as u8) >= Tag::I32Array as u8 && (self as u8) <= Tag::U8Array as u8
    }

    /// Returns true for variants carrying a count header (arrays and strings).
    pub const fn is_sequence(self) -> bool {
        self.is_array() || matches!(self, Tag::String)
    }

    /// The fixed number of bytes following the open tag.
    ///
    /// For scalars this is the width of the value, for arrays and strings it is the count
    /// header. Tables carry no header.
    pub const fn fixed_size(self) -> usize {
        match self {
            Tag::I8 | Tag::U8 | Tag::Char => 1,
            Tag::I32 | Tag::U32 | Tag::F32 => 4,
            Tag::I64 | Tag::U64 | Tag::F64 => 8,
            Tag::I32Array
            | Tag::I64Array
            | Tag::F32Array
            | Tag::F64Array
            | Tag::I8Array
            | Tag::U32Array
            | Tag::U64Array
            | Tag::U8Array
            | Tag::String => HEADER_SIZE,
            Tag::Table => 0,
        }
    }

    /// The size of one payload element of an array or string.
    ///
    /// The element of sequence tag `k` is the scalar with tag `k - 9`.
    pub fn element_size(self) -> Option<usize> {
        if !self.is_sequence() {
            return None;
        }
        Self::from_open(self.open() - Self::ELEMENT_OFFSET).map(Tag::fixed_size)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::I32 => "I32",
            Tag::I64 => "I64",
            Tag::F32 => "F32",
            Tag::F64 => "F64",
            Tag::I8 => "I8",
            Tag::U32 => "U32",
            Tag::U64 => "U64",
            Tag::U8 => "U8",
            Tag::Char => "Char",
            Tag::I32Array => "I32A",
            Tag::I64Array => "I64A",
            Tag::F32Array => "F32A",
            Tag::F64Array => "F64A",
            Tag::I8Array => "I8A",
            Tag::U32Array => "U32A",
            Tag::U64Array => "U64A",
            Tag::U8Array => "U8A",
            Tag::String => "String",
            Tag::Table => "Table",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw byte found where a tag was expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker(pub u8);

impl Marker {
    /// The variant this byte would open, if any.
    pub fn opens(self) -> Option<Tag> {
        Tag::from_open(self.0)
    }

    /// The variant this byte would close, if any.
    pub fn closes(self) -> Option<Tag> {
        Tag::from_close(self.0)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opens().or_else(|| self.closes()) {
            Some(tag) => f.write_str(tag.name()),
            None => write!(f, "UNKNOWN ({})", self.0),
        }
    }
}
