//! Configuration parsing benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sift_benchmarks::criterion_config;
use sift_config::toml::{parse_sift_toml, serialize_sift_toml};
use sift_config::ConfigLayering;
use std::collections::HashMap;

const FULL_CONFIG: &str = r#"
[registry]
url = "https://npm.internal.example.com"
downloads-url = "https://stats.internal.example.com/downloads"
user-agent = "sift-bench/1.0"
timeout-secs = 10

[search]
page-size = 50
maintainer-page-size = 100
concurrency = 8

[downloads]
period = "last-month"
"#;

fn bench_sift_toml(c: &mut Criterion) {
    let mut group = c.benchmark_group("sift_toml");

    group.bench_function("parse", |b| {
        b.iter(|| black_box(parse_sift_toml(FULL_CONFIG).unwrap()));
    });

    let parsed = parse_sift_toml(FULL_CONFIG).unwrap();
    group.bench_function("serialize", |b| {
        b.iter(|| black_box(serialize_sift_toml(&parsed).unwrap()));
    });

    group.finish();
}

fn bench_layering(c: &mut Criterion) {
    let global = parse_sift_toml(FULL_CONFIG).unwrap();
    let project = parse_sift_toml("[search]\npage-size = 25\n").unwrap();
    let env: HashMap<String, String> =
        [("SIFT_DOWNLOAD_PERIOD".to_string(), "last-year".to_string())].into_iter().collect();
    let cli: HashMap<String, String> =
        [("registry".to_string(), "http://localhost:4873".to_string())].into_iter().collect();

    c.bench_function("merge_configs", |b| {
        b.iter(|| {
            black_box(
                ConfigLayering::merge_configs(
                    Some(global.clone()),
                    Some(project.clone()),
                    env.clone(),
                    cli.clone(),
                )
                .unwrap(),
            )
        });
    });
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_sift_toml, bench_layering
}
criterion_main!(benches);
