//! Package page aggregate types.
//!
//! A [`PackageAggregate`] is the display-ready view of one resolved version of
//! a package, built fresh from a registry document for every request.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dependency::{DependencyKind, DependencyMap};

/// Author or contributor: either a bare string or a structured record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Person {
    /// `"Name <email> (url)"` style string
    Simple(String),
    /// Structured record
    Detailed {
        #[serde(default)]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Person {
    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Person::Simple(name) => name,
            Person::Detailed { name, .. } => name,
        }
    }
}

/// Repository information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    /// Simple URL string
    Url(String),
    /// Detailed repository object
    Detailed {
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        repo_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        directory: Option<String>,
    },
}

impl Repository {
    /// Repository URL, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Repository::Url(url) => Some(url),
            Repository::Detailed { url, .. } => url.as_deref(),
        }
    }
}

/// Registry account listed as a maintainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One published version with its publish time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    /// ISO timestamp, empty when the registry has no time entry
    pub date: String,
    /// Deprecation message, if this version is deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl VersionRecord {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }
}

/// Normalized, display-ready package data for one resolved version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageAggregate {
    pub name: String,
    /// Resolved version this aggregate describes
    pub version: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub author: Option<Person>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<Repository>,
    pub readme: Option<String>,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
    pub peer_dependencies: DependencyMap,
    pub engines: IndexMap<String, String>,
    /// Every published version, newest first
    pub versions: Vec<VersionRecord>,
    pub maintainers: Vec<Maintainer>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    /// Deprecation message of the resolved version
    pub deprecated: Option<String>,
    pub dist_tags: IndexMap<String, String>,
    /// Ships TypeScript declarations
    pub types: bool,
    pub unpacked_size: Option<u64>,
    pub file_count: Option<u64>,
}

impl PackageAggregate {
    /// Check if the resolved version is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// Dependency map of the given kind
    pub fn dependencies_of(&self, kind: DependencyKind) -> &DependencyMap {
        match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Peer => &self.peer_dependencies,
        }
    }

    /// Check if the package declares no dependencies of any kind
    pub fn has_no_dependencies(&self) -> bool {
        DependencyKind::ALL
            .iter()
            .all(|kind| self.dependencies_of(*kind).is_empty())
    }

    /// Dist-tags pointing at `version`
    pub fn tags_for(&self, version: &str) -> Vec<&str> {
        self.dist_tags
            .iter()
            .filter(|(_, tagged)| tagged.as_str() == version)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    /// Check if the package has this keyword
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_aggregate() -> PackageAggregate {
        let mut dist_tags = IndexMap::new();
        dist_tags.insert("latest".to_string(), "2.0.0".to_string());
        dist_tags.insert("next".to_string(), "3.0.0-rc.1".to_string());
        dist_tags.insert("stable".to_string(), "2.0.0".to_string());

        PackageAggregate {
            name: "test-package".to_string(),
            version: "2.0.0".to_string(),
            description: Some("A test package".to_string()),
            keywords: vec!["web".to_string(), "framework".to_string()],
            author: None,
            license: Some("MIT".to_string()),
            homepage: None,
            repository: None,
            readme: None,
            dependencies: DependencyMap::new(),
            dev_dependencies: DependencyMap::new(),
            peer_dependencies: DependencyMap::new(),
            engines: IndexMap::new(),
            versions: Vec::new(),
            maintainers: Vec::new(),
            published_at: None,
            updated_at: None,
            deprecated: None,
            dist_tags,
            types: false,
            unpacked_size: None,
            file_count: None,
        }
    }

    #[test]
    fn test_person_deserialization() {
        let simple: Person = serde_json::from_str(r#""Jane Doe <jane@example.com>""#).unwrap();
        assert_eq!(simple.name(), "Jane Doe <jane@example.com>");

        let detailed: Person =
            serde_json::from_str(r#"{"name": "Jane Doe", "email": "jane@example.com"}"#).unwrap();
        assert_eq!(detailed.name(), "Jane Doe");
    }

    #[test]
    fn test_repository_deserialization() {
        let simple: Repository = serde_json::from_str(r#""github:user/repo""#).unwrap();
        assert_eq!(simple.url(), Some("github:user/repo"));

        let detailed: Repository = serde_json::from_str(
            r#"{"type": "git", "url": "git+https://github.com/user/repo.git", "directory": "packages/core"}"#,
        )
        .unwrap();
        assert_eq!(detailed.url(), Some("git+https://github.com/user/repo.git"));
    }

    #[test]
    fn test_tags_for_version() {
        let pkg = create_test_aggregate();
        assert_eq!(pkg.tags_for("2.0.0"), vec!["latest", "stable"]);
        assert_eq!(pkg.tags_for("3.0.0-rc.1"), vec!["next"]);
        assert!(pkg.tags_for("1.0.0").is_empty());
    }

    #[test]
    fn test_dependencies_of() {
        let mut pkg = create_test_aggregate();
        assert!(pkg.has_no_dependencies());

        pkg.peer_dependencies
            .insert("react".to_string(), ">=16".to_string());
        assert!(!pkg.has_no_dependencies());
        assert_eq!(pkg.dependencies_of(DependencyKind::Peer).len(), 1);
        assert!(pkg.dependencies_of(DependencyKind::Runtime).is_empty());
    }

    #[test]
    fn test_keywords() {
        let pkg = create_test_aggregate();
        assert!(pkg.has_keyword("web"));
        assert!(!pkg.has_keyword("database"));
        assert!(!pkg.is_deprecated());
    }
}
