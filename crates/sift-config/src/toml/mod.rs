//! sift.toml configuration parsing and validation

use serde::{Deserialize, Serialize};
use sift_core::error::SiftError;
use sift_core::types::search::MAX_PAGE_SIZE;
use sift_core::types::DownloadPeriod;

use crate::ConfigResult;

/// Complete sift.toml configuration; every section and key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiftToml {
    /// Registry and downloads service endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistrySection>,

    /// Search listing sizes and fan-out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSection>,

    /// Download statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<DownloadsSection>,
}

/// `[registry]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistrySection {
    /// Registry base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Downloads statistics base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Per-request timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Bearer token for private mirrors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// `[search]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Listing size for maintainer pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_page_size: Option<u32>,

    /// Download-count requests in flight; 0 is unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

/// `[downloads]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DownloadsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<DownloadPeriod>,
}

/// Parse TOML string to SiftToml configuration
pub fn parse_sift_toml(content: &str) -> ConfigResult<SiftToml> {
    let config: SiftToml = toml::from_str(content).map_err(|e| SiftError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize SiftToml to TOML string
pub fn serialize_sift_toml(config: &SiftToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| SiftError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate every value present in the file
pub fn validate_config(config: &SiftToml) -> ConfigResult<()> {
    if let Some(registry) = &config.registry {
        if let Some(url) = &registry.url {
            validate_url("registry.url", url)?;
        }
        if let Some(url) = &registry.downloads_url {
            validate_url("registry.downloads-url", url)?;
        }
        if let Some(timeout) = registry.timeout_secs {
            validate_timeout("registry.timeout-secs", timeout)?;
        }
        if let Some(agent) = &registry.user_agent {
            if agent.trim().is_empty() {
                return Err(SiftError::ConfigValidation {
                    field: "registry.user-agent".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
    }

    if let Some(search) = &config.search {
        if let Some(size) = search.page_size {
            validate_page_size("search.page-size", size)?;
        }
        if let Some(size) = search.maintainer_page_size {
            validate_page_size("search.maintainer-page-size", size)?;
        }
    }

    Ok(())
}

/// Load and parse sift.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<SiftToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SiftError::io(format!("Failed to read {}", path), e))?;

    parse_sift_toml(&content).map_err(|e| match e {
        SiftError::TomlParse { message } => SiftError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        SiftError::ConfigValidation { field, reason } => SiftError::ConfigValidation {
            field,
            reason: format!("{} (in {})", reason, path),
        },
        other => other,
    })
}

/// Absolute http(s) URL
pub(crate) fn validate_url(field: &str, value: &str) -> ConfigResult<()> {
    let parsed = url::Url::parse(value).map_err(|e| SiftError::ConfigValidation {
        field: field.to_string(),
        reason: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(SiftError::ConfigValidation {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}

pub(crate) fn validate_page_size(field: &str, size: u32) -> ConfigResult<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(SiftError::ConfigValidation {
            field: field.to_string(),
            reason: format!("must be between 1 and {}, got {}", MAX_PAGE_SIZE, size),
        });
    }
    Ok(())
}

pub(crate) fn validate_timeout(field: &str, secs: u64) -> ConfigResult<()> {
    if secs == 0 {
        return Err(SiftError::ConfigValidation {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
