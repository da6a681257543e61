//! Dependency maps as shown on a package page.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dependency name to version range, in upstream order
pub type DependencyMap = IndexMap<String, String>;

/// Type of dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Normal runtime dependency
    Runtime,
    /// Development-only dependency
    Dev,
    /// Peer dependency (must be provided by consumer)
    Peer,
}

impl DependencyKind {
    /// Display order used by package pages
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::Runtime,
        DependencyKind::Peer,
        DependencyKind::Dev,
    ];

    /// Section heading
    pub fn title(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "Dependencies",
            DependencyKind::Dev => "Dev Dependencies",
            DependencyKind::Peer => "Peer Dependencies",
        }
    }

    /// Check if this dependency is needed at runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self, DependencyKind::Runtime)
    }
}

/// Entries of a dependency map sorted by name
pub fn sorted_entries(map: &DependencyMap) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = map
        .iter()
        .map(|(name, range)| (name.as_str(), range.as_str()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}
