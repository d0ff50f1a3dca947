//! In-memory tree of typed nodes.
//!
//! A [Node] owns its payload outright: arrays and strings own their buffers and a [Table] owns
//! every key and child. Dropping a node releases the whole subtree, children first.

use crate::tag::Tag;

/// A single value in a tree.
///
/// The variant is fixed at construction. Only the contents of arrays, strings and tables can
/// change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    I8(i8),
    U32(u32),
    U64(u64),
    /// An unsigned byte.
    U8(u8),
    /// An 8-bit character. Stored like [Node::U8] but tagged differently on the wire.
    Char(u8),
    I32Array(Vec<i32>),
    I64Array(Vec<i64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
    I8Array(Vec<i8>),
    U32Array(Vec<u32>),
    U64Array(Vec<u64>),
    U8Array(Vec<u8>),
    /// Text, stored as raw bytes (no terminator, not required to be UTF-8).
    String(Vec<u8>),
    Table(Table),
}

/// An insertion-ordered list of `(key, value)` entries.
///
/// Keys are not required to be unique: duplicates are kept in order and survive encoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    entries: Vec<(Vec<u8>, Node)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry, taking ownership of the key and the value.
    pub fn push(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Node>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style [Table::push].
    pub fn with(mut self, key: impl Into<Vec<u8>>, value: impl Into<Node>) -> Self {
        self.push(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value of the first entry with the given key.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Node> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    /// Returns the values of every entry with the given key, in order.
    pub fn get_all<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = &'a Node> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(Vec<u8>, Node)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Vec<u8>, Node)> {
        self.entries
    }
}

impl<K: Into<Vec<u8>>, V: Into<Node>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<Vec<(Vec<u8>, Node)>> for Table {
    fn from(entries: Vec<(Vec<u8>, Node)>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Table {
    type Item = (Vec<u8>, Node);
    type IntoIter = std::vec::IntoIter<(Vec<u8>, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Scalar and array constructors and accessors
macro_rules! impl_node_variant {
    ($scalar:ident, $array:ident, $type:ty, $as_scalar:ident, $as_array:ident) => {
        impl From<$type> for Node {
            fn from(value: $type) -> Self {
                Node::$scalar(value)
            }
        }

        impl From<Vec<$type>> for Node {
            fn from(values: Vec<$type>) -> Self {
                Node::$array(values)
            }
        }

        impl Node {
            pub fn $as_scalar(&self) -> Option<$type> {
                match self {
                    Node::$scalar(value) => Some(*value),
                    _ => None,
                }
            }

            pub fn $as_array(&self) -> Option<&[$type]> {
                match self {
                    Node::$array(values) => Some(values),
                    _ => None,
                }
            }
        }
    };
}

impl_node_variant!(I32, I32Array, i32, as_i32, as_i32_array);
impl_node_variant!(I64, I64Array, i64, as_i64, as_i64_array);
impl_node_variant!(F32, F32Array, f32, as_f32, as_f32_array);
impl_node_variant!(F64, F64Array, f64, as_f64, as_f64_array);
impl_node_variant!(I8, I8Array, i8, as_i8, as_i8_array);
impl_node_variant!(U32, U32Array, u32, as_u32, as_u32_array);
impl_node_variant!(U64, U64Array, u64, as_u64, as_u64_array);
impl_node_variant!(U8, U8Array, u8, as_u8, as_u8_array);

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value.into_bytes())
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

impl Node {
    /// Builds a table node from `(key, value)` pairs, keeping their order.
    pub fn table<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Node>,
    {
        Node::Table(entries.into_iter().collect())
    }

    /// Returns the wire tag of this node.
    pub fn tag(&self) -> Tag {
        match self {
            Node::I32(_) => Tag::I32,
            Node::I64(_) => Tag::I64,
            Node::F32(_) => Tag::F32,
            Node::F64(_) => Tag::F64,
            Node::I8(_) => Tag::I8,
            Node::U32(_) => Tag::U32,
            Node::U64(_) => Tag::U64,
            Node::U8(_) => Tag::U8,
            Node::Char(_) => Tag::Char,
            Node::I32Array(_) => Tag::I32Array,
            Node::I64Array(_) => Tag::I64Array,
            Node::F32Array(_) => Tag::F32Array,
            Node::F64Array(_) => Tag::F64Array,
            Node::I8Array(_) => Tag::I8Array,
            Node::U32Array(_) => Tag::U32Array,
            Node::U64Array(_) => Tag::U64Array,
            Node::U8Array(_) => Tag::U8Array,
            Node::String(_) => Tag::String,
            Node::Table(_) => Tag::Table,
        }
    }

    /// Number of elements of an array, bytes of a string, or entries of a table.
    ///
    /// Returns `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::I32Array(v) => Some(v.len()),
            Node::I64Array(v) => Some(v.len()),
            Node::F32Array(v) => Some(v.len()),
            Node::F64Array(v) => Some(v.len()),
            Node::I8Array(v) => Some(v.len()),
            Node::U32Array(v) => Some(v.len()),
            Node::U64Array(v) => Some(v.len()),
            Node::U8Array(v) => Some(v.len()),
            Node::String(s) => Some(s.len()),
            Node::Table(t) => Some(t.len()),
            Node::I32(_)
            | Node::I64(_)
            | Node::F32(_)
            | Node::F64(_)
            | Node::I8(_)
            | Node::U32(_)
            | Node::U64(_)
            | Node::U8(_)
            | Node::Char(_) => None,
        }
    }

    /// Returns `None` for scalars, like [Node::len].
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    pub fn as_char(&self) -> Option<u8> {
        match self {
            Node::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Raw bytes of a string node.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a string node, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|s| std::str::from_utf8(s).ok())
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable access to a table, for assembling it incrementally.
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }
}
