//! HTTP client for the npm registry and the downloads statistics service

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use url::Url;

use sift_core::error::SiftError;
use sift_core::types::{PackageAggregate, SearchOptions, SearchPage};
use sift_core::utils::encode_package_name;

use crate::api::{PackageDocument, SearchResponse};
use crate::fanout::Concurrency;
use crate::normalize;
use crate::RegistryResult;

mod downloads;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Public downloads statistics service
pub const DEFAULT_DOWNLOADS_URL: &str = "https://api.npmjs.org/downloads";

/// Default cap on concurrent enrichment requests
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Search query the popular listing runs
const POPULAR_QUERY: &str = "keywords:javascript";

/// Authentication configuration for registry access
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Bearer token for authentication
    pub token: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
}

impl AuthConfig {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// `Authorization` header value, if any credentials are set
    fn header_value(&self) -> RegistryResult<Option<HeaderValue>> {
        let raw = if let Some(token) = &self.token {
            format!("Bearer {}", token)
        } else if let (Some(username), Some(password)) = (&self.username, &self.password) {
            use base64::{engine::general_purpose, Engine as _};
            let credentials = general_purpose::STANDARD.encode(format!("{}:{}", username, password));
            format!("Basic {}", credentials)
        } else {
            return Ok(None);
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|e| SiftError::InvalidRequest {
            field: "token".to_string(),
            reason: e.to_string(),
        })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Settings for building a [`RegistryClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub registry_url: String,
    pub downloads_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub auth: Option<AuthConfig>,
    /// Cap for download-count fan-out
    pub concurrency: Concurrency,
}

impl ClientConfig {
    /// Point both services at one base URL, downloads under `/downloads`
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            registry_url: base.to_string(),
            downloads_url: format!("{}/downloads", base),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            downloads_url: DEFAULT_DOWNLOADS_URL.to_string(),
            user_agent: concat!("sift/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            auth: None,
            concurrency: Concurrency::from_limit(DEFAULT_CONCURRENCY),
        }
    }
}

/// Read-only client for registry metadata, search and download counts
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    registry_url: String,
    downloads_url: String,
    /// Sent on registry requests only, never to the downloads service
    auth: Option<HeaderValue>,
    concurrency: Concurrency,
}

impl RegistryClient {
    /// Client for the public registry with default settings
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Public registry client with authentication
    pub fn with_auth(auth: AuthConfig) -> RegistryResult<Self> {
        Self::with_config(ClientConfig {
            auth: Some(auth),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SiftError::network(format!("Failed to create HTTP client: {}", e), e))?;

        let auth = match &config.auth {
            Some(auth) => auth.header_value()?,
            None => None,
        };

        Ok(Self {
            client,
            registry_url: config.registry_url.trim_end_matches('/').to_string(),
            downloads_url: config.downloads_url.trim_end_matches('/').to_string(),
            auth,
            concurrency: config.concurrency,
        })
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    pub fn downloads_url(&self) -> &str {
        &self.downloads_url
    }

    /// Fan-out cap for per-hit enrichment
    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    /// Full-text search, one page.
    ///
    /// A blank `query` fails locally with `InvalidRequest` (field `query`)
    /// and is never sent, so it does not surface as `Upstream`. An
    /// out-of-range `options.size` is rejected the same way.
    pub async fn search(&self, query: &str, options: SearchOptions) -> RegistryResult<SearchPage> {
        options.validate()?;
        if query.trim().is_empty() {
            return Err(SiftError::InvalidRequest {
                field: "query".to_string(),
                reason: "search text must not be empty".to_string(),
            });
        }

        let mut url = Url::parse(&format!("{}/-/v1/search", self.registry_url)).map_err(|e| {
            SiftError::InvalidRequest {
                field: "registry".to_string(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("text", query)
            .append_pair("size", &options.size.to_string())
            .append_pair("from", &options.from.to_string());

        let response = self.registry_get(url.as_str()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream(status));
        }

        let body = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SiftError::network(format!("Failed to parse search results: {}", e), e))?;

        Ok(normalize::search_page(body))
    }

    /// Packages a registry account maintains
    pub async fn search_maintainer(&self, username: &str, size: u32) -> RegistryResult<SearchPage> {
        let query = format!("maintainer:{}", username.trim_start_matches('@'));
        self.search(&query, SearchOptions::new(size, 0)?).await
    }

    /// Broad popularity listing used when there is nothing to search for
    pub async fn popular_packages(&self, count: u32) -> RegistryResult<SearchPage> {
        self.search(POPULAR_QUERY, SearchOptions::new(count, 0)?).await
    }

    /// Fetch the full package document
    pub async fn fetch_metadata(&self, package_name: &str) -> RegistryResult<PackageDocument> {
        let url = format!("{}/{}", self.registry_url, encode_package_name(package_name));
        let response = self.registry_get(&url).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SiftError::PackageNotFound {
                name: package_name.to_string(),
            }),
            status if status.is_success() => response
                .json::<PackageDocument>()
                .await
                .map_err(|e| SiftError::network(format!("Failed to parse metadata: {}", e), e)),
            status => Err(upstream(status)),
        }
    }

    /// Fetch and normalize one version; `None` means the `latest` dist-tag
    pub async fn fetch_details(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> RegistryResult<PackageAggregate> {
        let document = self.fetch_metadata(package_name).await?;
        let resolved = normalize::resolve_version(&document, version)?;
        normalize::normalize(document, &resolved)
    }

    async fn registry_get(&self, url: &str) -> RegistryResult<Response> {
        tracing::debug!(url, "registry request");

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(auth) = &self.auth {
            request = request.header(AUTHORIZATION, auth.clone());
        }

        request
            .send()
            .await
            .map_err(|e| SiftError::network(format!("Request to {} failed: {}", url, e), e))
    }
}

/// Non-success status from the registry
fn upstream(status: StatusCode) -> SiftError {
    SiftError::Upstream {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
    }
}

#[cfg(test)]
mod tests;
