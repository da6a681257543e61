//! Registry document normalization benchmarks
//!
//! Measures deserializing and flattening package documents of growing
//! version counts, plus search envelope mapping.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sift_benchmarks::{criterion_config, package_document_json, search_response_json};
use sift_registry::normalize::search_page;
use sift_registry::{normalize, resolve_version, sorted_versions, PackageDocument, SearchResponse};

fn bench_document_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_parsing");

    for version_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*version_count as u64));
        let json = package_document_json(*version_count);

        group.bench_with_input(BenchmarkId::new("versions", version_count), &json, |b, json| {
            b.iter(|| black_box(serde_json::from_str::<PackageDocument>(json).unwrap()));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for version_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*version_count as u64));
        let document: PackageDocument =
            serde_json::from_str(&package_document_json(*version_count)).unwrap();

        group.bench_with_input(
            BenchmarkId::new("latest", version_count),
            &document,
            |b, document| {
                b.iter(|| {
                    let version = resolve_version(document, None).unwrap();
                    black_box(normalize(document.clone(), &version).unwrap())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sorted_versions", version_count),
            &document,
            |b, document| {
                b.iter(|| black_box(sorted_versions(document)));
            },
        );
    }

    group.finish();
}

fn bench_search_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_mapping");

    for hit_count in [20, 250].iter() {
        group.throughput(Throughput::Elements(*hit_count as u64));
        let response: SearchResponse =
            serde_json::from_str(&search_response_json(*hit_count)).unwrap();

        group.bench_with_input(BenchmarkId::new("hits", hit_count), &response, |b, response| {
            b.iter(|| black_box(search_page(response.clone())));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_document_parsing, bench_normalize, bench_search_mapping
}
criterion_main!(benches);
