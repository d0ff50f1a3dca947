use criterion::criterion_main;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sbf_codec::{Node, Table};

mod decode;
mod encode;

/// Builds a table of `width` entries per level, `depth` levels deep, with random leaves.
pub(crate) fn random_tree(width: usize, depth: usize, seed: u64) -> Node {
    let mut rng = StdRng::seed_from_u64(seed);
    build(&mut rng, width, depth)
}

fn build(rng: &mut StdRng, width: usize, depth: usize) -> Node {
    if depth == 0 {
        return match rng.gen_range(0..4) {
            0 => Node::U64(rng.gen()),
            1 => Node::from(format!("leaf-{}", rng.gen::<u32>())),
            2 => Node::from((0..64).map(|_| rng.gen::<f64>()).collect::<Vec<_>>()),
            _ => Node::from((0..256).map(|_| rng.gen::<u8>()).collect::<Vec<_>>()),
        };
    }
    let mut table = Table::with_capacity(width);
    for i in 0..width {
        table.push(format!("key-{i}"), build(rng, width, depth - 1));
    }
    Node::Table(table)
}

criterion_main!(encode::benches, decode::benches);
