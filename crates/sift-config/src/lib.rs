//! Configuration loading for Sift
//!
//! This crate handles parsing and validation of sift.toml files and layers
//! them with environment and command-line overrides into resolved
//! [`Settings`].

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource, Settings, PROJECT_CONFIG};
pub use toml::{DownloadsSection, RegistrySection, SearchSection, SiftToml};

use sift_core::error::SiftError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, SiftError>;
