//! npm registry client for Sift
//!
//! This crate talks to the npm registry and the downloads statistics service,
//! normalizes registry documents into display aggregates, and fans out
//! download-count enrichment for search listings.

pub mod api;
pub mod client;
pub mod fanout;
pub mod normalize;
pub mod pages;

// Re-export main types
pub use api::{DistInfo, LicenseField, PackageDocument, SearchResponse, VersionDocument};
pub use client::{AuthConfig, ClientConfig, RegistryClient, DEFAULT_DOWNLOADS_URL, DEFAULT_REGISTRY_URL};
pub use fanout::{fan_out, Concurrency};
pub use normalize::{normalize, resolve_version, sorted_versions};
pub use pages::{
    enrich_with_downloads, fetch_package_page, maintainer_packages, popular_with_downloads,
    search_with_downloads, PackagePage,
};

use sift_core::error::SiftError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, SiftError>;
