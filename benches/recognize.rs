//! Parse + recognition throughput over synthetic sources.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a function with `n` counting loops and `n` near-miss loops
/// (step 2, so the recognizer walks the header and rejects).
fn synthetic_source(n: usize) -> String {
    let mut src = String::from("int main() {\n");
    for i in 0..n {
        src.push_str(&format!(
            "    for (int a{i} = 0; a{i} < {bound}; a{i}++) {{ }}\n",
            bound = i + 10
        ));
        src.push_str(&format!(
            "    for (int b{i} = 0; b{i} < {bound}; b{i} += 2) {{ }}\n",
            bound = i + 10
        ));
    }
    src.push_str("    return 0;\n}\n");
    src
}

fn bench_parse(c: &mut Criterion) {
    let src_16 = synthetic_source(16);
    let src_128 = synthetic_source(128);

    let mut group = c.benchmark_group("parse");
    group.bench_function("16_loops", |b| {
        b.iter(|| loupe::parse_source_silent(black_box(&src_16)))
    });
    group.bench_function("128_loops", |b| {
        b.iter(|| loupe::parse_source_silent(black_box(&src_128)))
    });
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let src_16 = synthetic_source(16);
    let src_128 = synthetic_source(128);

    let mut group = c.benchmark_group("analyze");
    group.bench_function("16_loops", |b| {
        b.iter(|| loupe::analyze_source(black_box(&src_16), "bench.lp"))
    });
    group.bench_function("128_loops", |b| {
        b.iter(|| loupe::analyze_source(black_box(&src_128), "bench.lp"))
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);
