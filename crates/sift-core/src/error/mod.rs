//! Error types and result aliases for Sift operations.
//!
//! Provides a unified error type that covers every failure a registry lookup
//! can surface, with actionable suggestions for the terminal front end.

use thiserror::Error;

/// Unified error type for all Sift operations
#[derive(Error, Debug)]
pub enum SiftError {
    // Registry errors
    #[error("Package '{name}' not found in registry")]
    PackageNotFound { name: String },

    #[error("Version '{version}' not found for package '{name}'")]
    VersionNotFound { name: String, version: String },

    #[error("Registry request failed ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    // Config errors
    #[error("Failed to parse sift.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Failed to serialize JSON: {message}")]
    JsonParse { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Sift operations
pub type SiftResult<T> = Result<T, SiftError>;

impl SiftError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// True for both a missing package and a missing version of an existing package
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SiftError::PackageNotFound { .. } | SiftError::VersionNotFound { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            SiftError::PackageNotFound { .. } => {
                Some("Check the package name spelling or try 'sift search <query>'")
            },
            SiftError::VersionNotFound { .. } => {
                Some("Run 'sift show <package> --all-versions' to list published versions")
            },
            SiftError::Upstream { status, .. } if *status >= 500 => {
                Some("The registry is having trouble; try again in a moment")
            },
            SiftError::Network { .. } => Some("Check your internet connection and try again"),
            SiftError::TomlParse { .. } | SiftError::ConfigValidation { .. } => {
                Some("Fix the value in sift.toml or the matching SIFT_* environment variable")
            },
            _ => None,
        }
    }
}
