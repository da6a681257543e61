//! Package identity resolution from route segments and CLI specs.
//!
//! Accepted segment shapes:
//! - `["%40scope%2Fname", "v", "1.0.0"]` (scoped name in one segment)
//! - `["@scope", "name", "v", "1.0.0"]` (scope split from name)
//! - `["name", "v", "1.0.0"]`
//!
//! The `v/<version>` suffix is optional in every shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::encoding::{decode_segment, encode_uri_component};

/// Literal segment that introduces a version selector
const VERSION_MARKER: &str = "v";

/// A package name plus an optional pinned version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub name: String,
    pub version: Option<String>,
}

impl PackageIdentity {
    /// Create an identity for the default (dist-tag resolved) version
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Create an identity pinned to a version
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Resolve an identity from raw path segments.
    ///
    /// Returns `None` when there is nothing to name a package with; callers
    /// treat that as not found.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        let decoded: Vec<String> = segments
            .iter()
            .map(|segment| decode_segment(segment.as_ref()).into_owned())
            .collect();

        let first = decoded.first()?;
        if first.is_empty() {
            return None;
        }

        let (name, version_at) = if first.starts_with('@') && first.contains('/') {
            (first.clone(), 1)
        } else if first.starts_with('@') {
            match decoded.get(1) {
                Some(rest) => (format!("{}/{}", first, rest), 2),
                // Bare scope: let the registry answer with a 404
                None => (first.clone(), 1),
            }
        } else {
            (first.clone(), 1)
        };

        let version = match (decoded.get(version_at), decoded.get(version_at + 1)) {
            (Some(marker), Some(version)) if marker == VERSION_MARKER && !version.is_empty() => {
                Some(version.clone())
            }
            _ => None,
        };

        Some(Self { name, version })
    }

    /// Parse a `name`, `name@version`, `@scope/name` or `@scope/name@version` spec
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        match spec.rfind('@') {
            Some(at) if at > 0 => {
                let (name, version) = (&spec[..at], &spec[at + 1..]);
                if name.is_empty() || name == "@" {
                    return None;
                }
                if version.is_empty() {
                    Some(Self::new(name))
                } else {
                    Some(Self::with_version(name, version))
                }
            }
            _ => Some(Self::new(spec)),
        }
    }

    /// Canonical route segments that resolve back to this identity
    pub fn to_path_segments(&self) -> Vec<String> {
        let mut segments = vec![encode_uri_component(&self.name)];
        if let Some(version) = &self.version {
            segments.push(VERSION_MARKER.to_string());
            segments.push(encode_uri_component(version));
        }
        segments
    }

    /// Whether the name carries an `@scope/` prefix
    pub fn is_scoped(&self) -> bool {
        self.name.starts_with('@') && self.name.contains('/')
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}
