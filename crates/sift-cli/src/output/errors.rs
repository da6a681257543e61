//! Error message formatting with actionable suggestions.
//!
//! Not-found failures get their own label so a missing package does not
//! read like a crash.

use super::colors::ColorSupport;
use sift_core::error::SiftError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Render `error` with its cause chain and a help line when one applies
    pub fn format_error(&self, error: &SiftError) -> String {
        // Both not-found kinds read the same to the user
        let label = if error.is_not_found() { "not found" } else { "error" };
        let mut lines = vec![format!("{}: {}", self.colors.red(label), error)];

        let mut cause = error.source();
        while let Some(inner) = cause {
            lines.push(format!("{}: {}", self.colors.dim("caused by"), inner));
            cause = inner.source();
        }

        if let Some(hint) = error.suggestion() {
            lines.push(format!("{}: {}", self.colors.dim("help"), hint));
        }

        lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_with_suggestion() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let text = formatter.format_error(&SiftError::PackageNotFound {
            name: "lefty-pad".to_string(),
        });

        assert!(text.starts_with("not found: Package 'lefty-pad' not found in registry\n"));
        assert!(text.contains("help: Check the package name spelling"));
    }

    #[test]
    fn test_source_chain() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let err = SiftError::io(
            "Failed to read sift.toml".to_string(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        );
        let text = formatter.format_error(&err);

        assert!(text.starts_with("error: IO error: Failed to read sift.toml\n"));
        assert!(text.contains("caused by: access denied\n"));
    }
}
