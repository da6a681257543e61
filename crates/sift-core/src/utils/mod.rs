//! Utility functions and helpers.
//!
//! Pure helpers shared by the registry client and the terminal front end.

pub mod encoding;
pub mod format;
pub mod install;
pub mod repository;

// Re-export commonly used utilities
pub use encoding::{decode_segment, encode_package_name, encode_uri_component};
pub use format::{format_downloads, format_file_size, format_relative_time, format_relative_time_now};
pub use install::{install_commands, InstallCommand, PackageManager};
pub use repository::github_url;
