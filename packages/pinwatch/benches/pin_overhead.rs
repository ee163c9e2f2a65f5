//! Benchmark measuring the cost of recording pins and looking them up.

#![expect(missing_docs, reason = "benchmarks do not require API documentation")]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pinwatch::{Registry, Stopwatch};

fn pin_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("pin");

    let watch = Stopwatch::with_name("bench");
    watch.start().unwrap();

    group.bench_function("unlabeled", |b| {
        b.iter(|| {
            black_box(watch.pin().unwrap());
        });
    });

    // Keep the timeline from growing without bound between groups.
    watch.restart();

    group.bench_function("labeled", |b| {
        b.iter(|| {
            black_box(watch.pin_named("label").unwrap());
        });
    });

    group.finish();
}

fn lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let watch = Stopwatch::with_name("lookup");
    watch.start().unwrap();
    for i in 0..1_000 {
        watch.pin_named(format!("pin-{i}")).unwrap();
    }

    group.bench_function("pin_time_by_label", |b| {
        b.iter(|| black_box(watch.pin_time(black_box("pin-500"))));
    });

    group.bench_function("pin_time_by_index", |b| {
        b.iter(|| black_box(watch.pin_time_at(black_box(500))));
    });

    let registry = Registry::new();
    drop(registry.get_or_create("existing"));

    group.bench_function("registry_get_existing", |b| {
        b.iter(|| black_box(registry.get_or_create(black_box("existing"))));
    });

    group.finish();
}

criterion_group!(benches, pin_overhead, lookup);
criterion_main!(benches);
