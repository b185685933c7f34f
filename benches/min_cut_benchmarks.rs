use criterion::{black_box, criterion_group, criterion_main, Criterion};

use contract_cut::{min_cut, min_cut_parallel, CutConfig, Multigraph};

/// A ring of complete cliques joined by single bridge edges; the minimum
/// cut severs two bridges.
fn ring_of_cliques(cliques: usize, size: usize) -> Multigraph<usize> {
    let mut edges = Vec::new();
    for c in 0..cliques {
        let base = c * size;
        for i in 0..size {
            for j in (i + 1)..size {
                edges.push((base + i, base + j));
            }
        }
        edges.push((base, ((c + 1) % cliques) * size));
    }
    Multigraph::from_edges(&edges).unwrap()
}

fn bench_min_cut(c: &mut Criterion) {
    let graph = ring_of_cliques(4, 6);
    let config = CutConfig {
        trials: 100,
        seed: Some(1),
    };

    c.bench_function("min_cut/ring_of_cliques_4x6", |b| {
        b.iter(|| min_cut(black_box(&graph), black_box(&config)))
    });

    c.bench_function("min_cut_parallel/ring_of_cliques_4x6", |b| {
        b.iter(|| min_cut_parallel(black_box(&graph), black_box(&config)))
    });
}

criterion_group!(benches, bench_min_cut);
criterion_main!(benches);
