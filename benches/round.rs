use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rebatch::{generate_batch, run_round, sin_degrees, Layout, RoundConfig};

fn bench_balanced_layout(c: &mut Criterion) {
    c.bench_function("balanced_layout_64_ranks", |b| {
        b.iter(|| {
            let layout = Layout::balanced(black_box(100_003), black_box(64)).unwrap();
            black_box(layout);
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let config = RoundConfig {
        pool: 8,
        max_batch: 2048,
        max_degrees: 180,
        seed: Some(7),
    };
    let batches: Vec<Vec<i32>> = (0..config.pool)
        .map(|rank| generate_batch(&config, rank))
        .collect();

    c.bench_function("round_8_workers", |b| {
        b.iter(|| {
            let output = run_round(black_box(batches.clone()), sin_degrees).unwrap();
            black_box(output);
        })
    });
}

criterion_group!(benches, bench_balanced_layout, bench_full_round);
criterion_main!(benches);
