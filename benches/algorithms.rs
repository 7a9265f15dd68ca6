use chunkwise::{transform, transform_reduce, Policy};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rayon::ThreadPoolBuilder;
use std::sync::Arc;

fn policies() -> Vec<(&'static str, Policy)> {
    let pool = Arc::new(ThreadPoolBuilder::new().build().unwrap());
    vec![
        ("seq", Policy::seq()),
        ("par", Policy::par(pool)),
    ]
}

fn bench_transform_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_reduce");
    for size in [1 << 12, 1 << 16, 1 << 20] {
        let data: Vec<i64> = (0..size as i64).collect();
        group.throughput(Throughput::Elements(size as u64));
        for (label, policy) in policies() {
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                b.iter(|| {
                    transform_reduce(&policy, data, 0i64, |a, b| a.wrapping_add(b), |&x| {
                        x.wrapping_mul(x)
                    })
                    .wait()
                    .unwrap()
                });
            });
        }
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for size in [1 << 12, 1 << 16, 1 << 20] {
        let data: Vec<i64> = (0..size as i64).collect();
        group.throughput(Throughput::Elements(size as u64));
        for (label, policy) in policies() {
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                let mut dst = vec![0i64; data.len()];
                b.iter(|| {
                    transform(&policy, data, &mut dst, |&x| x.wrapping_mul(3))
                        .wait()
                        .unwrap()
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_transform_reduce, bench_transform);
criterion_main!(benches);
