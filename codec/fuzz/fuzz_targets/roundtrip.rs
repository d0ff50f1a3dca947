#![no_main]

use arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use sbf_codec::{deserialize, serialize, size, Encode, Node, Table};

const MAX_DEPTH: usize = 8;

/// Builds a node whose tables nest at most `depth` levels.
fn arbitrary_node(u: &mut Unstructured<'_>, depth: usize) -> Result<Node> {
    let max = if depth == 0 { 17 } else { 18 };
    Ok(match u.int_in_range(0..=max)? {
        0 => Node::I32(u.arbitrary()?),
        1 => Node::I64(u.arbitrary()?),
        2 => Node::F32(u.arbitrary()?),
        3 => Node::F64(u.arbitrary()?),
        4 => Node::I8(u.arbitrary()?),
        5 => Node::U32(u.arbitrary()?),
        6 => Node::U64(u.arbitrary()?),
        7 => Node::U8(u.arbitrary()?),
        8 => Node::Char(u.arbitrary()?),
        9 => Node::I32Array(u.arbitrary()?),
        10 => Node::I64Array(u.arbitrary()?),
        11 => Node::F32Array(u.arbitrary()?),
        12 => Node::F64Array(u.arbitrary()?),
        13 => Node::I8Array(u.arbitrary()?),
        14 => Node::U32Array(u.arbitrary()?),
        15 => Node::U64Array(u.arbitrary()?),
        16 => Node::U8Array(u.arbitrary()?),
        17 => Node::String(u.arbitrary()?),
        _ => {
            let len = u.int_in_range(0..=8)?;
            let mut table = Table::with_capacity(len);
            for _ in 0..len {
                let key: Vec<u8> = u.arbitrary()?;
                table.push(key, arbitrary_node(u, depth - 1)?);
            }
            Node::Table(table)
        }
    })
}

#[derive(Debug)]
struct FuzzInput {
    node: Node,
    raw: Vec<u8>,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Self {
            node: arbitrary_node(u, MAX_DEPTH)?,
            raw: u.arbitrary()?,
        })
    }
}

fn fuzz(input: FuzzInput) {
    // Round trip an arbitrary tree
    let len = size(&input.node);
    let mut bytes = vec![0u8; len];
    let mut cursor = 0;
    serialize(&input.node, &mut bytes, &mut cursor).expect("buffer sized by size()");
    assert_eq!(cursor, len);
    assert_eq!(&bytes[..], &input.node.encode()[..]);

    let mut cursor = 0;
    let decoded = deserialize(&bytes, &mut cursor)
        .expect("Failed to decode a successfully encoded input!")
        .expect("non-empty input");
    assert_eq!(cursor, len);

    // NaN payloads never compare equal, so compare the re-encoding instead
    assert_eq!(&decoded.encode()[..], &bytes[..]);

    // Arbitrary bytes must never panic and must leave the cursor alone on failure
    let mut cursor = 0;
    match deserialize(&input.raw, &mut cursor) {
        Ok(Some(node)) => {
            assert_eq!(size(&node), cursor);
            assert_eq!(&node.encode()[..], &input.raw[..cursor]);
        }
        Ok(None) => assert!(input.raw.is_empty()),
        Err(_) => assert_eq!(cursor, 0),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
