use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use loglyzer::{AnalysisConfig, Analyzer, BracketedParser, Parallelism, RecordParser};

fn synthetic_log(lines: usize) -> String {
    let levels = ["INFO", "DEBUG", "WARN", "ERROR"];
    let mut out = String::with_capacity(lines * 72);
    for i in 0..lines {
        let level = levels[i % levels.len()];
        out.push_str(&format!(
            "2024-01-15 {:02}:{:02}:{:02} [{}] request {} finished with status {}\n",
            (i / 3600) % 24,
            (i / 60) % 60,
            i % 60,
            level,
            i % 500,
            if level == "ERROR" { 500 } else { 200 }
        ));
    }
    out
}

fn bench_parse_line(c: &mut Criterion) {
    let parser = BracketedParser::new().unwrap();
    let valid = "2024-01-15 10:31:15 [ERROR] Failed to connect to API: timeout";
    let invalid = "2024-01-15T10:31:15Z level=error msg=timeout";

    c.bench_function("parse_valid_line", |b| {
        b.iter(|| {
            black_box(parser.parse(black_box(valid), 1).is_ok());
        });
    });

    c.bench_function("parse_invalid_line", |b| {
        b.iter(|| {
            black_box(parser.parse(black_box(invalid), 1).is_err());
        });
    });
}

fn bench_analyze(c: &mut Criterion) {
    let input = synthetic_log(100_000);
    let mut group = c.benchmark_group("analyze_100k_lines");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.sample_size(20);

    for (name, directive) in [
        ("sequential", Parallelism::Never),
        ("parallel", Parallelism::Always),
    ] {
        let mut config = AnalysisConfig::default();
        config.parallel.directive = directive;
        let analyzer = Analyzer::new(config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| {
                black_box(analyzer.analyze(black_box(input)).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_line, bench_analyze);
criterion_main!(benches);
