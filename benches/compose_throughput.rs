/// Composer and parser throughput
///
/// Measures how fast the generator produces each profile's file size and
/// how fast linter output is counted, structured and heuristic.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use lintbench::composer::compose;
use lintbench::config::default_profiles;
use lintbench::diagnostics::{parse_report, ToolFormat};

/// Benchmark: one file per default profile size
fn bench_compose_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.measurement_time(Duration::from_secs(5));

    for profile in default_profiles() {
        let lines = profile.lines_per_file;
        group.throughput(Throughput::Elements(lines));
        group.bench_with_input(BenchmarkId::from_parameter(&profile.name), &lines, |b, &lines| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(compose(black_box(lines), seed))
            });
        });
    }

    group.finish();
}

fn eslint_output(files: usize) -> String {
    let file = r#"{"filePath":"/tmp/x.js","messages":[{"severity":2},{"severity":1},{"severity":1}]}"#;
    format!("[{}]", vec![file; files].join(","))
}

/// Benchmark: counting issues in a large ESLint document
fn bench_parse_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_report");
    group.measurement_time(Duration::from_secs(5));

    let json = eslint_output(450);
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("eslint_json", |b| {
        b.iter(|| black_box(parse_report(ToolFormat::EslintJson, black_box(&json))))
    });

    let text = "x.js:1:1 warning no-var\nx.js:2:1 error eqeqeq\n".repeat(1000);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("oxlint_text", |b| {
        b.iter(|| black_box(parse_report(ToolFormat::OxlintJson, black_box(&text))))
    });

    group.finish();
}

criterion_group!(benches, bench_compose_profiles, bench_parse_report);
criterion_main!(benches);
