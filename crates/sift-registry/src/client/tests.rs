//! Unit tests for registry client

use super::*;

use sift_core::types::{DownloadPeriod, Enriched};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENT: &str = r#"{
    "name": "test-package",
    "description": "A test package",
    "dist-tags": { "latest": "1.1.0", "beta": "2.0.0-beta.1" },
    "versions": {
        "1.0.0": { "version": "1.0.0", "license": "MIT" },
        "1.1.0": {
            "version": "1.1.0",
            "license": "MIT",
            "dependencies": { "lodash": "^4.17.21" },
            "types": "index.d.ts"
        },
        "2.0.0-beta.1": { "version": "2.0.0-beta.1" }
    },
    "time": {
        "created": "2023-01-01T00:00:00.000Z",
        "modified": "2023-09-01T00:00:00.000Z",
        "1.0.0": "2023-01-01T00:00:00.000Z",
        "1.1.0": "2023-03-01T00:00:00.000Z",
        "2.0.0-beta.1": "2023-09-01T00:00:00.000Z"
    }
}"#;

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::with_config(ClientConfig::for_base(&server.uri())).unwrap()
}

async fn mount_document(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_registry_client_creation() {
    let client = RegistryClient::new().unwrap();
    assert_eq!(client.registry_url(), DEFAULT_REGISTRY_URL);
    assert_eq!(client.downloads_url(), DEFAULT_DOWNLOADS_URL);
    assert_eq!(client.concurrency(), Concurrency::from_limit(DEFAULT_CONCURRENCY));
}

#[tokio::test]
async fn test_registry_client_with_auth() {
    let client = RegistryClient::with_auth(AuthConfig::bearer("test-token")).unwrap();
    assert_eq!(client.registry_url(), DEFAULT_REGISTRY_URL);
    assert!(client.auth.as_ref().unwrap().is_sensitive());
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = RegistryClient::with_config(ClientConfig::for_base("http://localhost:4873/")).unwrap();
    assert_eq!(client.registry_url(), "http://localhost:4873");
    assert_eq!(client.downloads_url(), "http://localhost:4873/downloads");
}

#[test]
fn test_auth_config_debug_redacts_secrets() {
    let auth = AuthConfig {
        token: None,
        username: Some("ci".to_string()),
        password: Some("hunter2".to_string()),
    };
    let debug = format!("{:?}", auth);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("ci"));
}

#[tokio::test]
async fn test_fetch_metadata_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-package"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DOCUMENT, "application/json"))
        .mount(&server)
        .await;

    let document = client_for(&server).fetch_metadata("test-package").await.unwrap();
    assert_eq!(document.name, "test-package");
    assert_eq!(document.description.as_deref(), Some("A test package"));
    assert_eq!(document.latest_version(), Some("1.1.0"));
}

#[tokio::test]
async fn test_fetch_metadata_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nonexistent-package"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_metadata("nonexistent-package").await;

    match result.unwrap_err() {
        SiftError::PackageNotFound { name } => assert_eq!(name, "nonexistent-package"),
        other => panic!("Expected PackageNotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_metadata_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    match client_for(&server).fetch_metadata("flaky").await.unwrap_err() {
        SiftError::Upstream { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_metadata_bad_body() {
    let server = MockServer::start().await;
    mount_document(&server, "/garbled", "<html>not json</html>").await;

    let err = client_for(&server).fetch_metadata("garbled").await.unwrap_err();
    assert!(matches!(err, SiftError::Network { .. }));
}

#[tokio::test]
async fn test_scoped_package_url_encoding() {
    let server = MockServer::start().await;
    mount_document(
        &server,
        "/@types%2Fnode",
        r#"{ "name": "@types/node", "dist-tags": { "latest": "1.0.0" }, "versions": { "1.0.0": {} } }"#,
    )
    .await;

    let document = client_for(&server).fetch_metadata("@types/node").await.unwrap();
    assert_eq!(document.name, "@types/node");
}

#[tokio::test]
async fn test_fetch_details_latest() {
    let server = MockServer::start().await;
    mount_document(&server, "/test-package", DOCUMENT).await;

    let aggregate = client_for(&server)
        .fetch_details("test-package", None)
        .await
        .unwrap();

    assert_eq!(aggregate.version, "1.1.0");
    assert!(aggregate.types);
    assert_eq!(aggregate.dependencies.get("lodash").map(String::as_str), Some("^4.17.21"));
    let versions: Vec<&str> = aggregate.versions.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(versions, vec!["2.0.0-beta.1", "1.1.0", "1.0.0"]);
}

#[tokio::test]
async fn test_fetch_details_explicit_version() {
    let server = MockServer::start().await;
    mount_document(&server, "/test-package", DOCUMENT).await;

    let aggregate = client_for(&server)
        .fetch_details("test-package", Some("1.0.0"))
        .await
        .unwrap();
    assert_eq!(aggregate.version, "1.0.0");
    assert!(!aggregate.types);
}

#[tokio::test]
async fn test_fetch_details_version_not_found() {
    let server = MockServer::start().await;
    mount_document(&server, "/test-package", DOCUMENT).await;

    let err = client_for(&server)
        .fetch_details("test-package", Some("9.0.0"))
        .await
        .unwrap_err();

    match err {
        SiftError::VersionNotFound { name, version } => {
            assert_eq!(name, "test-package");
            assert_eq!(version, "9.0.0");
        }
        other => panic!("Expected VersionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "react hooks"))
        .and(query_param("size", "20"))
        .and(query_param("from", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "objects": [
                    {
                        "package": { "name": "use-debounce", "version": "10.0.0", "author": "xnimorz" },
                        "score": { "final": 0.7, "detail": { "quality": 0.9, "popularity": 0.4, "maintenance": 1.0 } }
                    }
                ],
                "total": 41
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let options = SearchOptions::for_page(3, 20).unwrap();
    let page = client_for(&server).search("react hooks", options).await.unwrap();

    assert_eq!(page.total, 41);
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].name, "use-debounce");
    assert_eq!(page.hits[0].author.as_deref(), Some("xnimorz"));
    assert_eq!(page.hits[0].score.maintenance, 1.0);
}

#[tokio::test]
async fn test_search_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("anything", SearchOptions::default())
        .await
        .unwrap_err();

    match err {
        SiftError::Upstream { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_rejects_invalid_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let zero = SearchOptions { size: 0, from: 0 };
    match client.search("react", zero).await {
        Err(SiftError::InvalidRequest { field, .. }) => assert_eq!(field, "size"),
        other => panic!("Expected InvalidRequest, got {:?}", other),
    }
    match client.search("   ", SearchOptions::default()).await {
        Err(SiftError::InvalidRequest { field, .. }) => assert_eq!(field, "query"),
        other => panic!("Expected InvalidRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_maintainer_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "maintainer:sindresorhus"))
        .and(query_param("size", "50"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{ "objects": [], "total": 0 }"#, "application/json"),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_maintainer("@sindresorhus", 50)
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_popular_packages_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "keywords:javascript"))
        .and(query_param("size", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{ "objects": [], "total": 0 }"#, "application/json"),
        )
        .mount(&server)
        .await;

    let page = client_for(&server).popular_packages(10).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_registry_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/private-pkg"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "name": "private-pkg", "versions": {} }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let config = ClientConfig {
        auth: Some(AuthConfig::bearer("secret")),
        ..ClientConfig::for_base(&server.uri())
    };
    let client = RegistryClient::with_config(config).unwrap();

    let document = client.fetch_metadata("private-pkg").await.unwrap();
    assert_eq!(document.name, "private-pkg");
}

#[tokio::test]
async fn test_download_count() {
    let server = MockServer::start().await;
    mount_document(
        &server,
        "/downloads/point/last-week/lodash",
        r#"{ "downloads": 51234567, "start": "2024-05-25", "end": "2024-05-31", "package": "lodash" }"#,
    )
    .await;

    let count = client_for(&server)
        .download_count("lodash", DownloadPeriod::LastWeek)
        .await;
    assert_eq!(count, Enriched::Value(51_234_567));
}

#[tokio::test]
async fn test_download_count_not_found_is_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/downloads/point/last-week/brand-new-package"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"{ "error": "package brand-new-package not found" }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let count = client_for(&server)
        .download_count("brand-new-package", DownloadPeriod::LastWeek)
        .await;
    assert_eq!(*count.value(), 0);
    assert!(count.is_degraded());
}

#[tokio::test]
async fn test_download_count_unreachable_is_zero() {
    let config = ClientConfig {
        timeout: Duration::from_secs(2),
        ..ClientConfig::for_base("http://127.0.0.1:9")
    };
    let client = RegistryClient::with_config(config).unwrap();

    let count = client.download_count("lodash", DownloadPeriod::LastDay).await;
    assert_eq!(count.into_value(), 0);
}

#[tokio::test]
async fn test_download_count_scoped_name() {
    let server = MockServer::start().await;
    mount_document(
        &server,
        "/downloads/point/last-month/@types%2Fnode",
        r#"{ "downloads": 42, "package": "@types/node" }"#,
    )
    .await;

    let count = client_for(&server)
        .download_count("@types/node", DownloadPeriod::LastMonth)
        .await;
    assert_eq!(count, Enriched::Value(42));
}

#[tokio::test]
async fn test_download_range() {
    let server = MockServer::start().await;
    mount_document(
        &server,
        "/downloads/range/last-week/lodash",
        r#"{
            "downloads": [
                { "day": "2024-05-30", "downloads": 100 },
                { "day": "2024-05-31", "downloads": 250 }
            ],
            "start": "2024-05-30",
            "end": "2024-05-31",
            "package": "lodash"
        }"#,
    )
    .await;

    let range = client_for(&server)
        .download_range("lodash", DownloadPeriod::LastWeek)
        .await;

    assert!(!range.is_degraded());
    let points = range.into_value();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].date, "2024-05-31");
    assert_eq!(sift_core::types::total_downloads(&points), 350);
}

#[tokio::test]
async fn test_download_range_bad_body_is_empty() {
    let server = MockServer::start().await;
    mount_document(&server, "/downloads/range/last-year/lodash", r#"{ "downloads": "lots" }"#).await;

    let range = client_for(&server)
        .download_range("lodash", DownloadPeriod::LastYear)
        .await;

    assert!(range.is_degraded());
    assert!(range.value().is_empty());
}
