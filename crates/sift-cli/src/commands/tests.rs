//! Unit tests for CLI commands.

use super::*;
use crate::output::colors::ColorSupport;
use sift_core::types::DownloadPeriod;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENT: &str = r#"{
    "name": "@babel/parser",
    "description": "A JavaScript parser",
    "dist-tags": { "latest": "7.24.0" },
    "versions": {
        "7.0.0": { "version": "7.0.0", "license": "MIT" },
        "7.24.0": { "version": "7.24.0", "license": "MIT", "types": "typings/babel-parser.d.ts" }
    },
    "time": {
        "created": "2018-08-27T00:00:00.000Z",
        "modified": "2024-02-28T00:00:00.000Z",
        "7.0.0": "2018-08-27T00:00:00.000Z",
        "7.24.0": "2024-02-28T00:00:00.000Z"
    }
}"#;

/// Create a test command context talking to the mock server
fn create_test_context(server: &MockServer, json: bool) -> CommandContext {
    let base = server.uri();
    let settings = Settings {
        registry_url: base.clone(),
        downloads_url: format!("{}/downloads", base),
        ..Settings::default()
    };
    let output = OutputHandler::with_colors(ColorSupport::disabled(), json);
    CommandContext::with_settings(settings, output).unwrap()
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

#[test]
fn test_resolve_identity_forms() {
    let words = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let spec = show::resolve_identity(&words(&["@babel/parser@7.0.0"])).unwrap();
    assert_eq!(spec.name, "@babel/parser");
    assert_eq!(spec.version.as_deref(), Some("7.0.0"));

    let encoded = show::resolve_identity(&words(&["%40babel%2Fparser"])).unwrap();
    assert_eq!(encoded.name, "@babel/parser");
    assert_eq!(encoded.version, None);

    let route = show::resolve_identity(&words(&["@babel", "parser", "v", "7.0.0"])).unwrap();
    assert_eq!(route.name, "@babel/parser");
    assert_eq!(route.version.as_deref(), Some("7.0.0"));

    let plain = show::resolve_identity(&words(&["lodash"])).unwrap();
    assert_eq!(plain.name, "lodash");

    assert!(show::resolve_identity(&words(&[""])).is_none());
}

#[tokio::test]
async fn test_show_package() {
    let server = MockServer::start().await;
    mount(&server, "/@babel%2Fparser", json(DOCUMENT)).await;
    mount(
        &server,
        "/downloads/point/last-week/@babel%2Fparser",
        json(r#"{ "downloads": 1000 }"#),
    )
    .await;

    let ctx = create_test_context(&server, false);
    let result = show::execute(
        vec!["@babel/parser".to_string()],
        show::ShowOptions::default(),
        &ctx,
    )
    .await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_show_json_with_downloads_outage() {
    let server = MockServer::start().await;
    mount(&server, "/@babel%2Fparser", json(DOCUMENT)).await;
    mount(
        &server,
        "/downloads/point/last-week/@babel%2Fparser",
        ResponseTemplate::new(500),
    )
    .await;

    let ctx = create_test_context(&server, true);
    let result = show::execute(
        vec!["@babel".to_string(), "parser".to_string()],
        show::ShowOptions {
            readme: true,
            all_versions: true,
        },
        &ctx,
    )
    .await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_show_missing_package() {
    let server = MockServer::start().await;
    mount(&server, "/no-such-package", ResponseTemplate::new(404)).await;

    let ctx = create_test_context(&server, false);
    let result = show::execute(vec!["no-such-package".to_string()], show::ShowOptions::default(), &ctx).await;
    match result {
        Err(SiftError::PackageNotFound { name }) => assert_eq!(name, "no-such-package"),
        other => panic!("Expected PackageNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_show_missing_version() {
    let server = MockServer::start().await;
    mount(&server, "/@babel%2Fparser", json(DOCUMENT)).await;

    let ctx = create_test_context(&server, false);
    let result = show::execute(
        vec!["@babel/parser@9.9.9".to_string()],
        show::ShowOptions::default(),
        &ctx,
    )
    .await;
    match result {
        Err(SiftError::VersionNotFound { name, version }) => {
            assert_eq!(name, "@babel/parser");
            assert_eq!(version, "9.9.9");
        }
        other => panic!("Expected VersionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_show_without_name_is_not_found() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, false);

    let result = show::execute(vec![String::new()], show::ShowOptions::default(), &ctx).await;
    assert!(matches!(result, Err(SiftError::PackageNotFound { .. })));
}

#[tokio::test]
async fn test_search_second_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "left pad"))
        .and(query_param("size", "20"))
        .and(query_param("from", "20"))
        .respond_with(json(
            r#"{ "objects": [ { "package": { "name": "left-pad", "version": "1.3.0" } } ], "total": 21 }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "/downloads/point/last-week/left-pad", json(r#"{ "downloads": 5 }"#)).await;

    let ctx = create_test_context(&server, false);
    let result = search::execute("left pad".to_string(), 2, &ctx).await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_search_upstream_failure() {
    let server = MockServer::start().await;
    mount(&server, "/-/v1/search", ResponseTemplate::new(502)).await;

    let ctx = create_test_context(&server, true);
    let result = search::execute("react".to_string(), 1, &ctx).await;
    assert!(matches!(result, Err(SiftError::Upstream { status: 502, .. })));
}

#[tokio::test]
async fn test_user_packages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "maintainer:sindresorhus"))
        .and(query_param("size", "50"))
        .respond_with(json(r#"{ "objects": [], "total": 0 }"#))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, false);
    let result = user::execute("@sindresorhus".to_string(), &ctx).await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_popular_packages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("size", "3"))
        .respond_with(json(
            r#"{ "objects": [ { "package": { "name": "react", "version": "18.3.1" } } ], "total": 1 }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "/downloads/point/last-week/react", json(r#"{ "downloads": 25000000 }"#)).await;

    let ctx = create_test_context(&server, false);
    assert!(popular::execute(3, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_downloads_range() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/downloads/range/last-week/lodash",
        json(r#"{ "downloads": [ { "day": "2024-05-30", "downloads": 10 }, { "day": "2024-05-31", "downloads": 12 } ] }"#),
    )
    .await;

    let ctx = create_test_context(&server, true);
    assert!(downloads::execute("lodash".to_string(), &ctx).await.is_ok());
}

#[tokio::test]
async fn test_downloads_unavailable_is_not_an_error() {
    let server = MockServer::start().await;
    mount(&server, "/downloads/range/last-month/lodash", ResponseTemplate::new(404)).await;

    let mut ctx = create_test_context(&server, false);
    ctx.settings.period = DownloadPeriod::LastMonth;
    assert!(downloads::execute("lodash".to_string(), &ctx).await.is_ok());
}

#[tokio::test]
async fn test_version_command() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, true);
    assert!(dispatch_command(crate::Commands::Version, &ctx).await.is_ok());
}
