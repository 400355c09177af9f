use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use minegrid::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("beginner", BoardConfig::beginner()),
        ("intermediate", BoardConfig::intermediate()),
        ("expert", BoardConfig::expert()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            b.iter(|| Board::generate(black_box(config), black_box(7)).unwrap());
        });
    }
    group.finish();
}

// Worst case for the reveal path: one click clears the whole grid.
fn bench_flood_fill(c: &mut Criterion) {
    let config = BoardConfig::new_unchecked(99, 99, 0);
    c.bench_function("flood_fill/99x99_open", |b| {
        b.iter_batched(
            || Board::generate(config, 7).unwrap(),
            |mut board| board.reveal(black_box((0, 0))),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
