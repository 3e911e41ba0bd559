use criterion::{criterion_group, criterion_main, Criterion};
use cascade_growth::cascade::{Cascade, generate_prefix_cascades};
use cascade_growth::features::extract_batch;

fn synthetic_cascades(n: i64, size: i64) -> Vec<Cascade> {
    (0..n)
        .map(|id| {
            let mut cascade = Cascade::new(id, 0, 0.0);
            for user in 1..=size {
                // attach each user under an earlier one to get some depth
                let parent = if user % 3 == 0 { user / 3 } else { 0 };
                cascade.add_event(user, parent, (user * (id % 7 + 1)) as f64);
            }
            cascade
        })
        .collect()
}

fn bench_extract_batch(c: &mut Criterion) {
    let mut cascades = synthetic_cascades(500, 200);

    c.bench_function("extract_batch_k50", |b| {
        b.iter(|| {
            let mut prefixes = generate_prefix_cascades(&mut cascades, 50);
            extract_batch(&mut prefixes)
        })
    });
}

criterion_group!(benches, bench_extract_batch);
criterion_main!(benches);
