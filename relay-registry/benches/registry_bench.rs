//! Criterion benchmarks for the consumer registry: uncontended ops and lock contention.

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use relay_core::{ConsumerIdentity, ConsumerPort};
use relay_registry::{MemoryRegistry, Registry};

fn consumer(port: u64) -> ConsumerIdentity {
    ConsumerIdentity::new("127.0.0.1".parse().unwrap(), ConsumerPort::new(port))
}

fn bench_exists_and_add(c: &mut Criterion) {
    let registry = MemoryRegistry::with_capacity(1024);
    let mut g = c.benchmark_group("exists_and_add");
    g.throughput(Throughput::Elements(1));
    g.bench_function("register_then_remove", |b| {
        let target = consumer(6714);
        b.iter(|| {
            black_box(registry.exists_and_add(target));
            registry.remove(&target);
        });
    });
    g.finish();
}

fn bench_exists(c: &mut Criterion) {
    let registry = MemoryRegistry::with_capacity(1024);
    for port in 0..1024 {
        registry.exists_and_add(consumer(port));
    }

    let mut g = c.benchmark_group("exists");
    g.throughput(Throughput::Elements(1));
    g.bench_function("hit", |b| {
        let target = consumer(512);
        b.iter(|| black_box(registry.exists(&target)));
    });
    g.bench_function("miss", |b| {
        let target = consumer(4096);
        b.iter(|| black_box(registry.exists(&target)));
    });
    g.finish();
}

fn bench_contention(c: &mut Criterion) {
    const THREADS: u64 = 4;
    const OPS: u64 = 1_000;

    let mut g = c.benchmark_group("contention");
    g.throughput(Throughput::Elements(THREADS * OPS));
    g.bench_function("four_threads_distinct_ports", |b| {
        b.iter(|| {
            let registry = Arc::new(MemoryRegistry::new());
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let registry = registry.clone();
                    thread::spawn(move || {
                        for i in 0..OPS {
                            registry.exists_and_add(consumer(t * OPS + i));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            black_box(registry.len())
        });
    });
    g.finish();
}

criterion_group!(benches, bench_exists_and_add, bench_exists, bench_contention);
criterion_main!(benches);
