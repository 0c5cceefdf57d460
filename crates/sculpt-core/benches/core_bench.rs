//! Criterion benchmarks for sculpt-core.
//!
//! These benchmarks exercise the pure-Rust engine and never touch the Python
//! bindings, so they run without the `python` feature.
//!
//! ## Benchmark groups
//!
//! 1. **parse**: Java parsing into the arena syntax tree.
//! 2. **locate**: Word and unit lookup, selection validation.
//! 3. **recommend**: Issue detection and import recommendation.
//! 4. **changes**: Rename, delete and reformat change construction.
//!
//! ## Running
//!
//! ```sh
//! cargo bench --manifest-path crates/sculpt-core/Cargo.toml
//! # Run only the changes group:
//! cargo bench --manifest-path crates/sculpt-core/Cargo.toml -- changes
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// The lib target is called `_sculpt_core` (matching the Python extension
// module name).
use _sculpt_core::locate::{locate_unit, locate_word, validate_selection, Granularity};
use _sculpt_core::models::{ChangeRequest, ProgramUnit};
use _sculpt_core::pipeline::{create_change, BraceFormatter, Capabilities, Formatter};
use _sculpt_core::recommend::{get_issues, recommend_imports, DetectorRegistry};
use _sculpt_core::source::{Context, JavaParser, Source};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A class with `n` methods chained through calls, a few fields and some
/// JDK types referenced without imports.
fn synthetic_class(n: usize) -> String {
    let mut text =
        String::from("package bench;\n\nimport java.util.List;\nimport java.io.File;\n\n");
    text.push_str("public class Bench {\n");
    text.push_str("    private int counter;\n    private Map<String, Integer> index;\n\n");
    for i in 0..n {
        text.push_str(&format!(
            "    private int step{i}(int value, String label) {{\n        if (value > {i}) {{\n            counter += value;\n        }}\n        ArrayList<String> seen = new ArrayList<>();\n        seen.add(label);\n        return {next};\n    }}\n\n",
            next = if i + 1 < n {
                format!("step{}(value + 1, label)", i + 1)
            } else {
                "counter".to_string()
            }
        ));
    }
    text.push_str("    public int run() {\n        return step0(0, \"start\");\n    }\n}\n");
    text
}

fn context_of(text: &str) -> Context {
    Context::parse(&Source::new("Bench.java", text), &JavaParser).unwrap()
}

// ---------------------------------------------------------------------------
// Benchmark: Parsing
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for n in [10, 100, 500] {
        let source = Source::new("Bench.java", synthetic_class(n));
        group.bench_with_input(BenchmarkId::new("java_methods", n), &source, |b, source| {
            b.iter(|| Context::parse(black_box(source), &JavaParser).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Locating
// ---------------------------------------------------------------------------

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let ctx = context_of(&synthetic_class(200));

    group.bench_function("locate_word_common", |b| {
        b.iter(|| locate_word(black_box(ctx.source()), black_box("counter")));
    });

    let method = ProgramUnit::Method("step100".to_string());
    group.bench_function("locate_unit_method", |b| {
        b.iter(|| locate_unit(black_box(&method), black_box(&ctx)));
    });

    let field = ProgramUnit::Field("counter".to_string());
    group.bench_function("locate_unit_field", |b| {
        b.iter(|| locate_unit(black_box(&field), black_box(&ctx)));
    });

    let start = ctx.text().find("if (value > 50)").unwrap();
    let end = start + ctx.text()[start..].find('}').unwrap() + 1;
    let selection = ctx.source().location(start, end).unwrap();
    group.bench_function("validate_selection_statement", |b| {
        b.iter(|| {
            validate_selection(
                black_box(&ctx),
                black_box(&selection),
                Granularity::Statements,
            )
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Recommendations
// ---------------------------------------------------------------------------

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let registry = DetectorRegistry::default();

    for n in [10, 200] {
        let ctx = context_of(&synthetic_class(n));
        group.bench_with_input(BenchmarkId::new("get_issues", n), &ctx, |b, ctx| {
            b.iter(|| get_issues(black_box(ctx), black_box(&registry)));
        });
        group.bench_with_input(BenchmarkId::new("recommend_imports", n), &ctx, |b, ctx| {
            b.iter(|| recommend_imports(black_box(ctx), 5));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Change construction
// ---------------------------------------------------------------------------

fn bench_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("changes");
    let capabilities = Capabilities::default();
    let ctx = context_of(&synthetic_class(200));

    let found = locate_unit(&ProgramUnit::Method("step50".to_string()), &ctx);
    let occurrence = found[0].occurrence.clone();
    group.bench_function("rename_method", |b| {
        b.iter(|| {
            let request = ChangeRequest::rename_method(occurrence.clone(), "advance");
            create_change(black_box(request), &ctx, &capabilities)
        });
    });

    let found = locate_unit(&ProgramUnit::Field("counter".to_string()), &ctx);
    let field = found[0].occurrence.clone();
    group.bench_function("rename_field", |b| {
        b.iter(|| {
            let request = ChangeRequest::rename_field(field.clone(), "total");
            create_change(black_box(request), &ctx, &capabilities)
        });
    });

    group.bench_function("optimize_imports", |b| {
        b.iter(|| {
            let request = ChangeRequest::optimize_imports(ctx.source());
            create_change(black_box(request), &ctx, &capabilities)
        });
    });

    let unformatted = synthetic_class(200).replace("    ", "");
    let formatter = BraceFormatter::default();
    group.bench_function("brace_formatter", |b| {
        b.iter(|| formatter.format(black_box(&unformatted)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Register all benchmark groups
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_parse, bench_locate, bench_recommend, bench_changes);
criterion_main!(benches);
