//! Core data types for Sift.
//!
//! This module provides the value shapes shared by the registry client and
//! the terminal front end:
//! - Package identity resolved from route segments
//! - The normalized package aggregate and its version records
//! - Search hits, pagination, and download statistics

pub mod dependency;
pub mod downloads;
pub mod identity;
pub mod package;
pub mod search;

// Re-export all public types
pub use dependency::{sorted_entries, DependencyKind, DependencyMap};
pub use downloads::{total_downloads, DownloadPeriod, DownloadPoint, Enriched};
pub use identity::PackageIdentity;
pub use package::{Maintainer, PackageAggregate, Person, Repository, VersionRecord};
pub use search::{Pagination, SearchHit, SearchOptions, SearchPage, SearchScore};
