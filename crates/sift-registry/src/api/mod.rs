//! npm registry and downloads API response types
//!
//! Maps keyed by version or tag deserialize into [`IndexMap`] so the order
//! the registry sent them in is kept.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use sift_core::types::{Maintainer, Person, Repository};

/// Full package document from `GET <registry>/<name>`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageDocument {
    /// Package name
    pub name: String,
    /// Package description
    pub description: Option<String>,
    /// Tag to version pointers (`latest`, `next`, ...)
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: IndexMap<String, String>,
    /// All versions metadata
    #[serde(default)]
    pub versions: IndexMap<String, VersionDocument>,
    /// Publish times per version, plus `created` and `modified`
    #[serde(default, deserialize_with = "string_entries")]
    pub time: IndexMap<String, String>,
    /// Registry accounts allowed to publish
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
    pub author: Option<Person>,
    pub repository: Option<Repository>,
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
    pub readme: Option<String>,
}

impl PackageDocument {
    /// Version the `latest` dist-tag points at
    pub fn latest_version(&self) -> Option<&str> {
        self.dist_tags.get("latest").map(String::as_str)
    }

    /// Package creation time
    pub fn created(&self) -> Option<&str> {
        self.time.get("created").map(String::as_str)
    }

    /// Last modification time
    pub fn modified(&self) -> Option<&str> {
        self.time.get("modified").map(String::as_str)
    }
}

/// Keep only string-valued entries; unpublished documents nest an object in `time`
fn string_entries<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(time) => Some((key, time)),
            _ => None,
        })
        .collect())
}

/// Keywords as a list; old documents store one comma or space separated string
fn keyword_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keywords = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(joined) => joined
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(keyword) => Some(keyword),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(keywords)
}

/// Metadata for a specific package version
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VersionDocument {
    /// Version string
    pub version: Option<String>,
    /// Package description
    pub description: Option<String>,
    /// License
    pub license: Option<LicenseField>,
    /// Dependencies
    pub dependencies: Option<IndexMap<String, String>>,
    /// Dev dependencies
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    /// Peer dependencies
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<IndexMap<String, String>>,
    /// Engine requirements; very old documents use an array here
    pub engines: Option<serde_json::Value>,
    /// TypeScript types entry point
    pub types: Option<serde_json::Value>,
    /// Legacy TypeScript typings entry point
    pub typings: Option<serde_json::Value>,
    /// Deprecation message
    pub deprecated: Option<String>,
    /// Distribution information
    pub dist: Option<DistInfo>,
}

impl VersionDocument {
    /// Whether this version ships TypeScript declarations
    pub fn has_types(&self) -> bool {
        self.types.is_some() || self.typings.is_some()
    }

    /// Engine requirements when given in object form
    pub fn engines_map(&self) -> IndexMap<String, String> {
        match &self.engines {
            Some(serde_json::Value::Object(map)) => map
                .iter()
                .filter_map(|(engine, range)| {
                    range.as_str().map(|range| (engine.clone(), range.to_string()))
                })
                .collect(),
            _ => IndexMap::new(),
        }
    }
}

/// License: an SPDX expression or a legacy `{type, url}` object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LicenseField {
    Spdx(String),
    Legacy {
        #[serde(rename = "type")]
        license_type: String,
        url: Option<String>,
    },
}

impl LicenseField {
    pub fn name(&self) -> &str {
        match self {
            LicenseField::Spdx(name) => name,
            LicenseField::Legacy { license_type, .. } => license_type,
        }
    }
}

/// Distribution information for package tarball
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DistInfo {
    /// Tarball download URL
    pub tarball: Option<String>,
    /// SHA-1 checksum (legacy)
    pub shasum: Option<String>,
    /// Subresource integrity hash (preferred)
    pub integrity: Option<String>,
    /// Unpackaged size in bytes
    #[serde(rename = "unpackedSize")]
    pub unpacked_size: Option<u64>,
    /// File count
    #[serde(rename = "fileCount")]
    pub file_count: Option<u64>,
}

/// Search envelope from `GET <registry>/-/v1/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub objects: Vec<SearchObject>,
    #[serde(default)]
    pub total: u64,
}

/// One search match
#[derive(Debug, Clone, Deserialize)]
pub struct SearchObject {
    pub package: SearchPackage,
    #[serde(default)]
    pub score: SearchScoreDocument,
}

/// Package summary inside a search match
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPackage {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
    pub date: Option<String>,
    pub author: Option<Person>,
    pub publisher: Option<Publisher>,
}

/// Account that published the matched version
#[derive(Debug, Clone, Deserialize)]
pub struct Publisher {
    pub username: String,
    pub email: Option<String>,
}

/// Score block of a search match
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchScoreDocument {
    #[serde(rename = "final", default)]
    pub final_score: f64,
    #[serde(default)]
    pub detail: ScoreDetail,
}

/// Score components, each in `0.0..=1.0`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreDetail {
    #[serde(default)]
    pub quality: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub maintenance: f64,
}

/// Body of `GET <downloads>/point/<period>/<name>`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadPointResponse {
    pub downloads: Option<u64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub package: Option<String>,
}

/// Body of `GET <downloads>/range/<period>/<name>`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRangeResponse {
    #[serde(default)]
    pub downloads: Vec<DailyDownloads>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub package: Option<String>,
}

/// One day of a download range
#[derive(Debug, Clone, Deserialize)]
pub struct DailyDownloads {
    pub day: String,
    pub downloads: u64,
}
