//! Criterion benchmarks for adjacency construction and traversal.
//! Few frequencies on purpose: groups are complete graphs, so edge count
//! grows quadratically with group size.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nefasto::graph::{bfs, connect_same_frequency, dfs};
use nefasto::registry::rand::{random_registry, RandomLayoutCfg};
use nefasto::registry::Bounds;

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    for &n in &[16usize, 64, 256] {
        let cfg = RandomLayoutCfg {
            bounds: Bounds::new(64, 64),
            antennas: n,
            frequencies: 2,
            ..RandomLayoutCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("connect", n), &n, |b, _| {
            b.iter_batched(
                || random_registry(cfg, 44),
                |mut reg| connect_same_frequency(&mut reg),
                BatchSize::SmallInput,
            )
        });

        let mut reg = random_registry(cfg, 45);
        connect_same_frequency(&mut reg);
        let Some(start) = reg.iter().next().map(|a| a.pos) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("dfs", n), &reg, |b, reg| {
            b.iter(|| dfs(reg, start, cfg.bounds).len())
        });
        group.bench_with_input(BenchmarkId::new("bfs", n), &reg, |b, reg| {
            b.iter(|| bfs(reg, start, cfg.bounds).len())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graph);
criterion_main!(benches);
