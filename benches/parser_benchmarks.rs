use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use simple_json_core::{lexer::Scanner, parse_with_settings, ParserSettings};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_JSON: &str = r#"{ "value": 42 }"#;

const SMALL_JSON: &str = r#"{
    "name": "test",
    "version": 1.0,
    "enabled": true,
    "tags": ["a", "b", "c"]
}"#;

const MEDIUM_JSON: &str = r#"{
    // Service configuration
    "servers": [
        { "host": "server1.com", "port": 8080, "ssl": true, "weight": 0.5 },
        { "host": "server2.com", "port": 8081, "ssl": true, "weight": 0.25 },
        { "host": "server3.com", "port": 8082, "ssl": false, "weight": 0.25 }
    ],
    "retries": 3,
    "timeout": 1.5e+1,
    "motd": "Welcome éè \"friends\"\n",
    "owner": null
}"#;

// Generate very large JSON for stress testing
fn generate_xlarge_json(array_size: usize) -> String {
    let mut json = String::from("{\n    \"items\": [\n");
    for i in 0..array_size {
        if i > 0 {
            json.push_str(",\n");
        }
        json.push_str(&format!(
            "        {{ \"id\": {}, \"name\": \"Item {}\", \"value\": {}.5, \"active\": {} }}",
            i,
            i,
            i * 100,
            i % 2 == 0
        ));
    }
    json.push_str("\n    ]\n}");
    json
}

// ============================================================================
// Scanner Benchmarks
// ============================================================================

fn bench_scanner_strings(c: &mut Criterion) {
    let source = format!("\"{}\"", "plain text with an \\n escape ".repeat(64));
    c.bench_function("scanner_string", |b| {
        b.iter(|| Scanner::new(black_box(source.as_bytes())).scan_string(usize::MAX))
    });
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parser_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_by_size");
    let settings = ParserSettings::default();

    for (name, source) in [
        ("tiny", TINY_JSON),
        ("small", SMALL_JSON),
        ("medium", MEDIUM_JSON),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| parse_with_settings(black_box(src.as_bytes()), &settings))
        });
    }

    group.finish();
}

fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_array_scaling");
    let settings = ParserSettings::default();

    for size in [10, 50, 100, 500, 1000] {
        let source = generate_xlarge_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| parse_with_settings(black_box(src.as_bytes()), &settings))
        });
    }

    group.finish();
}

fn bench_early_rejection(c: &mut Criterion) {
    // A tight array limit should stop the parse long before the input ends.
    let source = generate_xlarge_json(1000);
    let settings = ParserSettings {
        max_array_length: 4,
        ..ParserSettings::default()
    };
    c.bench_function("parser_limit_rejection", |b| {
        b.iter(|| parse_with_settings(black_box(source.as_bytes()), &settings))
    });
}

criterion_group!(scanner_benches, bench_scanner_strings);

criterion_group!(
    parser_benches,
    bench_parser_sizes,
    bench_parser_scaling,
    bench_early_rejection
);

criterion_main!(scanner_benches, parser_benches);
