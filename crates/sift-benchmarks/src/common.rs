//! Common utilities for benchmarks

use criterion::Criterion;

/// Default criterion settings shared by every bench target
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
}

/// Registry document JSON with `version_count` published versions
pub fn package_document_json(version_count: usize) -> String {
    let mut versions = Vec::with_capacity(version_count);
    let mut times = Vec::with_capacity(version_count);

    for i in 0..version_count {
        let version = format!("1.{}.{}", i / 10, i % 10);
        versions.push(format!(
            r#""{v}": {{ "version": "{v}", "license": "MIT", "dependencies": {{ "dep-a": "^1.0.0", "dep-b": "~2.{i}.0" }}, "dist": {{ "unpackedSize": {size}, "fileCount": 12 }} }}"#,
            v = version,
            i = i,
            size = 1024 * (i + 1)
        ));
        times.push(format!(
            r#""{}": "2020-01-01T00:00:{:02}.000Z""#,
            version,
            i % 60
        ));
    }

    let latest = version_count
        .checked_sub(1)
        .map(|i| format!("1.{}.{}", i / 10, i % 10))
        .unwrap_or_else(|| "1.0.0".to_string());

    format!(
        r#"{{ "name": "bench-package", "description": "Benchmark fixture", "dist-tags": {{ "latest": "{}" }}, "versions": {{ {} }}, "time": {{ "created": "2020-01-01T00:00:00.000Z", {} }} }}"#,
        latest,
        versions.join(", "),
        times.join(", ")
    )
}

/// Search response JSON with `hit_count` objects
pub fn search_response_json(hit_count: usize) -> String {
    let objects: Vec<String> = (0..hit_count)
        .map(|i| {
            format!(
                r#"{{ "package": {{ "name": "pkg-{i}", "version": "1.0.{i}", "description": "Package {i}", "keywords": ["bench", "fixture"], "date": "2024-01-01T00:00:00.000Z", "publisher": {{ "username": "bench" }} }}, "score": {{ "detail": {{ "quality": 0.9, "popularity": 0.5, "maintenance": 1.0 }} }} }}"#,
                i = i
            )
        })
        .collect();

    format!(r#"{{ "objects": [{}], "total": {} }}"#, objects.join(", "), hit_count)
}
