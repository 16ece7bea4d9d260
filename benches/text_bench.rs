use cotext_core::Replica;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark single character insert
fn bench_single_insert(c: &mut Criterion) {
    c.bench_function("text_single_insert", |b| {
        b.iter(|| {
            let mut replica = Replica::new("bench");
            black_box(replica.insert(0, "a").unwrap());
        });
    });
}

/// Benchmark sequential typing (simulates a user typing at the end)
fn bench_sequential_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sequential_typing");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut replica = Replica::new("bench");
                for i in 0..size {
                    black_box(replica.insert(i, "a").unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark forward deletion of a prepared document
fn bench_delete(c: &mut Criterion) {
    c.bench_function("text_delete_500_chars", |b| {
        b.iter_batched(
            || {
                let mut replica = Replica::new("bench");
                let text = "a".repeat(500);
                replica.insert(0, &text).unwrap();
                replica
            },
            |mut replica| {
                black_box(replica.delete(0, 500).unwrap());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark a symmetric merge of two diverged replicas
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_symmetric_merge");

    for size in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || {
                    let mut alice = Replica::new("alice");
                    let mut bob = Replica::new("bob");
                    for i in 0..size {
                        alice.insert(i, "a").unwrap();
                        bob.insert(i, "b").unwrap();
                    }
                    (alice, bob)
                },
                |(mut alice, mut bob)| {
                    alice.merge_from(&bob).unwrap();
                    bob.merge_from(&alice).unwrap();
                    black_box((alice, bob))
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_insert,
    bench_sequential_typing,
    bench_delete,
    bench_merge
);
criterion_main!(benches);
