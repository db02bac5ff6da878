//! Benchmark: tokenizer throughput on realistic command lines.
//!
//! Run with: `cargo bench -p rolo-parser --bench tokenize_bench`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rolo_parser::{Flag, tokenize};

fn record_flags() -> Vec<Flag> {
    ["n/", "p/", "e/", "a/", "t/"]
        .into_iter()
        .map(Flag::new)
        .collect()
}

fn bench_short_add_line(c: &mut Criterion) {
    let flags = record_flags();
    let line = "add n/ Ada Lovelace p/ 555-0100 e/ ada@example.org \
                a/ \"12 Byron St, London\" t/math t/pioneer";
    c.bench_function("tokenize_short_add_line", |b| {
        b.iter(|| tokenize(black_box(line), black_box(&flags)))
    });
}

fn bench_many_repeated_flags(c: &mut Criterion) {
    let flags = record_flags();
    let mut line = String::from("add n/ Ada Lovelace");
    for i in 0..100 {
        line.push_str(&format!(" t/tag{i}"));
    }
    c.bench_function("tokenize_hundred_tags", |b| {
        b.iter(|| tokenize(black_box(&line), black_box(&flags)))
    });
}

fn bench_quoted_heavy_line(c: &mut Criterion) {
    let flags = record_flags();
    let mut line = String::from("add");
    for _ in 0..20 {
        line.push_str(" n/ \"Has \\\"quoted\\\" text with t/ inside\"");
    }
    c.bench_function("tokenize_quoted_heavy_line", |b| {
        b.iter(|| tokenize(black_box(&line), black_box(&flags)))
    });
}

criterion_group!(
    benches,
    bench_short_add_line,
    bench_many_repeated_flags,
    bench_quoted_heavy_line
);
criterion_main!(benches);
