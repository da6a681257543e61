//! Terminal output formatting and utilities.
//!
//! This module provides consistent output across all commands: colored text
//! for people, pretty JSON for scripts, and error messages with suggestions.

pub mod colors;
pub mod errors;
pub mod render;

use serde::Serialize;
use sift_core::error::{SiftError, SiftResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    json: bool,
}

impl OutputHandler {
    /// Create a new output handler; `json` switches commands to JSON output
    pub fn new(json: bool) -> Self {
        Self::with_colors(colors::ColorSupport::detect(), json)
    }

    pub fn with_colors(colors: colors::ColorSupport, json: bool) -> Self {
        Self { colors, json }
    }

    pub fn colors(&self) -> &colors::ColorSupport {
        &self.colors
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a line as-is
    pub fn line(&self, text: &str) {
        println!("{}", text);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> SiftResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| SiftError::JsonParse {
            message: e.to_string(),
        })?;
        println!("{}", text);
        Ok(())
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(false)
    }
}
