use crate::random_tree;
use criterion::{black_box, criterion_group, Criterion};
use sbf_codec::{serialize, size};

fn bench_encode(c: &mut Criterion) {
    for (width, depth) in [(4, 2), (8, 3), (16, 3)] {
        let node = random_tree(width, depth, 0);
        let len = size(&node);
        c.bench_function(
            &format!("{}/width={width} depth={depth} len={len}", module_path!()),
            |b| {
                let mut bytes = vec![0u8; len];
                b.iter(|| {
                    let mut cursor = 0;
                    serialize(black_box(&node), &mut bytes, &mut cursor).unwrap();
                    cursor
                });
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_encode
}
