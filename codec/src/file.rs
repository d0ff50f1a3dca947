//! Reading and writing whole documents.
//!
//! A document is a single version byte followed by one encoded node:
//!
//! ```text
//! +---------+------------------+
//! | version |       node       |
//! +---------+------------------+
//! ```

use crate::{
    codec::{Decode, EncodeSize, Write},
    config::Config,
    node::Node,
    Error,
};
use bytes::{BufMut, BytesMut};
use std::{fs, io, path::Path};
use tracing::{debug, warn};

/// Version byte written at the start of every document.
pub const FORMAT_VERSION: u8 = 1;

/// Documents shorter than this cannot hold a version byte and a node.
const MIN_DOCUMENT_SIZE: usize = 3;

/// A decoded document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub version: u8,
    /// `None` if the input was too short to contain a node.
    pub root: Option<Node>,
}

/// Reads the entire contents of the file at `path`.
pub fn read_all_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };
    if !metadata.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), "read file");
    Ok(bytes)
}

/// Writes `bytes` to `path`, creating or truncating the file.
pub fn write_all_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, bytes)?;
    debug!(path = %path.display(), len = bytes.len(), "wrote file");
    Ok(())
}

/// Encodes `node` as a document (prefixed with [FORMAT_VERSION]).
pub fn encode_file(node: &Node) -> BytesMut {
    let len = 1 + node.encode_size();
    let mut buf = BytesMut::with_capacity(len);
    buf.put_u8(FORMAT_VERSION);
    node.write(&mut buf);
    assert_eq!(buf.len(), len, "write() did not write expected bytes");
    buf
}

/// Decodes a document using the default [Config].
pub fn decode_file(bytes: &[u8]) -> Result<Document, Error> {
    decode_file_cfg(bytes, &Config::default())
}

/// Decodes a document.
///
/// Input shorter than a version byte plus the smallest node decodes to version `0` with no
/// root. Any bytes following the root node are rejected.
pub fn decode_file_cfg(bytes: &[u8], cfg: &Config) -> Result<Document, Error> {
    if bytes.len() < MIN_DOCUMENT_SIZE {
        debug!(len = bytes.len(), "document too short");
        return Ok(Document {
            version: 0,
            root: None,
        });
    }

    let version = bytes[0];
    if version != FORMAT_VERSION {
        warn!(version, expected = FORMAT_VERSION, "unknown document version");
    }
    let root = Node::decode_cfg(&bytes[1..], cfg)?;
    Ok(Document {
        version,
        root: Some(root),
    })
}

/// Encodes `node` as a document and writes it to `path`.
pub fn write_file(path: impl AsRef<Path>, node: &Node) -> Result<(), Error> {
    write_all_bytes(path, &encode_file(node))
}

/// Reads and decodes the document at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Document, Error> {
    let bytes = read_all_bytes(path)?;
    decode_file(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;
    use tempfile::tempdir;

    #[test]
    fn test_encode_file_layout() {
        let encoded = encode_file(&Node::I32(42));
        assert_eq!(&encoded[..], &[1, 1, 42, 0, 0, 0, 255]);
    }

    #[test]
    fn test_round_trip() {
        let node = Node::table([("abc", Node::I32(5))]);
        let encoded = encode_file(&node);
        let document = decode_file(&encoded).unwrap();
        assert_eq!(document.version, FORMAT_VERSION);
        assert_eq!(document.root, Some(node));
    }

    #[test]
    fn test_short_input() {
        for bytes in [&[][..], &[1][..], &[1, 19][..]] {
            let document = decode_file(bytes).unwrap();
            assert_eq!(document.version, 0);
            assert_eq!(document.root, None);
        }
    }

    #[test]
    fn test_unknown_version() {
        let mut encoded = encode_file(&Node::U8(3)).to_vec();
        encoded[0] = 7;
        let document = decode_file(&encoded).unwrap();
        assert_eq!(document.version, 7);
        assert_eq!(document.root, Some(Node::U8(3)));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut encoded = encode_file(&Node::U8(3)).to_vec();
        encoded.extend_from_slice(&[Tag::U8.open(), 4, Tag::U8.close()]);
        assert!(matches!(decode_file(&encoded), Err(Error::ExtraData(3))));
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.sbf");
        let node = Node::table([
            ("name", Node::from("sbf")),
            ("values", Node::from(vec![1.5f64, -2.25])),
        ]);

        write_file(&path, &node).unwrap();
        let document = read_file(&path).unwrap();
        assert_eq!(document.version, FORMAT_VERSION);
        assert_eq!(document.root, Some(node));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.sbf");
        assert!(matches!(read_all_bytes(&path), Err(Error::FileNotFound(p)) if p == path));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(read_all_bytes(dir.path()), Err(Error::NotAFile(_))));
    }

    #[test]
    fn test_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw");
        write_all_bytes(&path, &[1, 2, 3]).unwrap();
        assert_eq!(read_all_bytes(&path).unwrap(), vec![1, 2, 3]);
    }
}
