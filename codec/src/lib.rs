//! Serialize trees of typed nodes.
//!
//! # Overview
//!
//! A self-describing binary format designed to efficiently and safely:
//! - Serialize a tree of typed values into a pre-sized buffer
//! - Deserialize untrusted binary input back into the same tree
//!
//! # Supported Types
//!
//! Every [Node] is one of:
//! - Scalars: `i8`, `u8`, `i32`, `u32`, `i64`, `u64`, `f32`, `f64` and a single-byte character
//! - Arrays of any of the numeric scalars
//! - Strings (raw bytes, not necessarily UTF-8)
//! - Tables: ordered sequences of `(key, node)` entries
//!
//! # Format
//!
//! Each node is wrapped in an open tag and a close tag (see [Tag]). Scalars are written in
//! little-endian byte order, arrays and strings are prefixed with a `u64` element count, and
//! tables are a run of `(string key, node)` pairs terminated by the table's close tag.
//!
//! # Example
//!
//! ```
//! use sbf_codec::{deserialize, serialize, size, Node};
//!
//! // Build a tree
//! let node = Node::table([
//!     ("name", Node::from("sbf")),
//!     ("sizes", Node::from(vec![1u32, 2, 3])),
//! ]);
//!
//! // Serialize into a buffer of the exact size
//! let mut bytes = vec![0u8; size(&node)];
//! let mut cursor = 0;
//! serialize(&node, &mut bytes, &mut cursor).unwrap();
//! assert_eq!(cursor, bytes.len());
//!
//! // Deserialize it back
//! let mut cursor = 0;
//! let decoded = deserialize(&bytes, &mut cursor).unwrap();
//! assert_eq!(decoded, Some(node));
//! ```

pub mod codec;
pub mod config;
pub mod de;
pub mod error;
pub mod file;
pub mod node;
pub mod primitives;
pub mod ser;
pub mod size;
pub mod tag;

// Re-export main types and traits
pub use codec::{Decode, DecodeExt, Encode, EncodeSize, Read, ReadExt, Write};
pub use config::Config;
pub use de::{deserialize, deserialize_cfg, Reader};
pub use error::{EntryPart, Error};
pub use file::{
    decode_file, decode_file_cfg, encode_file, read_all_bytes, read_file, write_all_bytes,
    write_file, Document, FORMAT_VERSION,
};
pub use node::{Node, Table};
pub use ser::serialize;
pub use size::size;
pub use tag::{Marker, Tag};
