//! Terminal color support detection and formatting.
//!
//! Provides automatic color detection that respects the NO_COLOR and
//! FORCE_COLOR environment variables and falls back to TTY detection.

use std::env;
use std::io::{self, IsTerminal};

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        // NO_COLOR wins over FORCE_COLOR
        if env::var_os("NO_COLOR").is_some() {
            return Self::disabled();
        }
        if env::var_os("FORCE_COLOR").is_some() {
            return Self::enabled();
        }

        Self {
            enabled: io::stdout().is_terminal(),
        }
    }

    /// Force enable colors
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, style: Ansi, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", style as u8, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(Ansi::Green, text)
    }

    /// Warnings and deprecation notices
    pub fn yellow(&self, text: &str) -> String {
        self.paint(Ansi::Yellow, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(Ansi::Red, text)
    }

    /// Versions and dist-tags
    pub fn cyan(&self, text: &str) -> String {
        self.paint(Ansi::Cyan, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(Ansi::Bold, text)
    }

    /// Secondary text: labels, metadata lines, hints
    pub fn dim(&self, text: &str) -> String {
        self.paint(Ansi::Dim, text)
    }
}

/// SGR codes
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
enum Ansi {
    Bold = 1,
    Dim = 2,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
}
