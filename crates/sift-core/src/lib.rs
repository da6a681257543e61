//! # sift-core
//!
//! Core types and utilities shared across all Sift crates.
//!
//! This crate provides:
//! - `PackageIdentity` resolution from route-style path segments
//! - `PackageAggregate`, `SearchHit` and download statistics types
//! - `SiftError` enum for unified error handling
//! - Pure formatting helpers for counts, sizes, dates and links
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (identity, aggregate, search, downloads)
//! - `error`: Error types and result aliases
//! - `utils`: Encoding and formatting helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{SiftError, SiftResult};
pub use types::{
    DependencyKind, DownloadPeriod, DownloadPoint, Enriched, PackageAggregate, PackageIdentity,
    SearchHit, SearchPage, VersionRecord,
};
