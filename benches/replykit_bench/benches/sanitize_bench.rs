//! Deep serializer benchmarks
//!
//! Measures sanitization throughput over the graph shapes handlers
//! actually return: flat records, nested records, and wide lists.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use replykit_core::{sanitize, Payload};

/// A flat record resembling a typical DTO.
fn flat_record() -> Payload {
    Payload::record([
        ("id", Payload::Int(42)),
        ("name", Payload::from("benchmark")),
        ("active", Payload::Bool(true)),
        ("score", Payload::Float(0.97)),
    ])
}

/// A record nested `depth` levels deep.
fn nested_record(depth: usize) -> Payload {
    let mut value = flat_record();
    for _ in 0..depth {
        value = Payload::record([("child", value), ("tag", Payload::from("node"))]);
    }
    value
}

/// A list of `width` flat records.
fn wide_list(width: usize) -> Payload {
    Payload::list((0..width).map(|_| flat_record()))
}

fn bench_sanitize(c: &mut Criterion) {
    c.bench_function("sanitize_flat_record", |b| {
        let value = flat_record();
        b.iter(|| sanitize(black_box(&value)))
    });

    let mut group = c.benchmark_group("sanitize_nested");
    for depth in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let value = nested_record(depth);
            b.iter(|| sanitize(black_box(&value)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("sanitize_wide");
    for width in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            let value = wide_list(width);
            b.iter(|| sanitize(black_box(&value)))
        });
    }
    group.finish();

    c.bench_function("sanitize_precision_heavy", |b| {
        let value = Payload::list((0..100).map(|i| Payload::Int(i64::MAX - i)));
        b.iter(|| sanitize(black_box(&value)))
    });
}

criterion_group!(benches, bench_sanitize);
criterion_main!(benches);
