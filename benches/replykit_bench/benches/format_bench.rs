//! Classifier/formatter benchmarks
//!
//! Measures per-shape formatting overhead: each recognized shape plus the
//! bare-value fallback.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use replykit_core::format;
use serde_json::json;

fn bench_format(c: &mut Criterion) {
    c.bench_function("format_single_descriptor", |b| {
        let value = json!({
            "type": "response",
            "message": "Done",
            "data": { "id": 1 },
            "statusCode": 200,
        });
        b.iter(|| format(black_box(value.clone()), false))
    });

    c.bench_function("format_paginated_descriptor", |b| {
        let value = json!({
            "type": "pagination",
            "data": {
                "items": [1, 2, 3, 4, 5],
                "totalCount": 42,
                "currentPage": 3,
                "pageSize": 10,
            },
        });
        b.iter(|| format(black_box(value.clone()), false))
    });

    c.bench_function("format_canonical_passthrough", |b| {
        let value = json!({
            "message": "Cached",
            "data": [1, 2, 3],
            "statusCode": 200,
            "date": "2024-01-01T00:00:00.000Z",
        });
        b.iter(|| format(black_box(value.clone()), false))
    });

    c.bench_function("format_bare_fallback", |b| {
        let value = json!({ "id": 1, "name": "x" });
        b.iter(|| format(black_box(value.clone()), false))
    });
}

criterion_group!(benches, bench_format);
criterion_main!(benches);
