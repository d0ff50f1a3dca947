use crate::random_tree;
use criterion::{black_box, criterion_group, Criterion};
use sbf_codec::{deserialize, Encode};

fn bench_decode(c: &mut Criterion) {
    for (width, depth) in [(4, 2), (8, 3), (16, 3)] {
        let encoded = random_tree(width, depth, 0).encode();
        c.bench_function(
            &format!(
                "{}/width={width} depth={depth} len={}",
                module_path!(),
                encoded.len()
            ),
            |b| {
                b.iter(|| {
                    let mut cursor = 0;
                    deserialize(black_box(&encoded), &mut cursor).unwrap()
                });
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_decode
}
