//! Integration tests for reading and writing documents on disk.

use sbf_codec::{read_file, write_all_bytes, write_file, Error, Node, Table, FORMAT_VERSION};
use tempfile::tempdir;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_document_round_trip() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("document.sbf");

    let mut inner = Table::new();
    inner.push("abc", 5i32);
    let node = Node::table([
        ("inner", Node::Table(inner)),
        ("bytes", Node::from(vec![1u8, 2, 3])),
        ("ratio", Node::F32(0.5)),
    ]);

    write_file(&path, &node).unwrap();
    let document = read_file(&path).unwrap();
    assert_eq!(document.version, FORMAT_VERSION);
    let root = document.root.unwrap();
    assert_eq!(root, node);

    let inner = root.as_table().unwrap().get("inner").unwrap();
    assert_eq!(inner.as_table().unwrap().get("abc"), Some(&Node::I32(5)));
}

#[test]
fn test_document_layout() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("document.sbf");

    write_file(&path, &Node::table([("abc", Node::I32(5))])).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(
        bytes,
        vec![
            1,  // version
            19, // table open
            18, 3, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', b'c', 238, // key
            1, 5, 0, 0, 0, 255, // value
            237, // table close
        ]
    );
}

#[test]
fn test_corrupt_document() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.sbf");

    write_all_bytes(&path, &[1, 1, 42, 0, 0, 0, 254]).unwrap();
    assert!(matches!(
        read_file(&path),
        Err(Error::CloseTagMismatch { .. })
    ));
}

#[test]
fn test_missing_document() {
    init_logging();
    let dir = tempdir().unwrap();
    let err = read_file(dir.path().join("nothing.sbf")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert!(!err.is_structural());
}
