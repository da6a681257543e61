//! Download statistics types and the enrichment result wrapper.
//!
//! Download counts decorate primary content; a failed lookup must never
//! block rendering. [`Enriched`] keeps that policy visible: the value is
//! always usable, and a degraded value carries the reason it was defaulted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SiftError;

/// Time window for download statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadPeriod {
    LastDay,
    #[default]
    LastWeek,
    LastMonth,
    LastYear,
}

impl DownloadPeriod {
    pub const ALL: [DownloadPeriod; 4] = [
        DownloadPeriod::LastDay,
        DownloadPeriod::LastWeek,
        DownloadPeriod::LastMonth,
        DownloadPeriod::LastYear,
    ];

    /// Path segment used by the downloads service
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadPeriod::LastDay => "last-day",
            DownloadPeriod::LastWeek => "last-week",
            DownloadPeriod::LastMonth => "last-month",
            DownloadPeriod::LastYear => "last-year",
        }
    }

    /// Short adjective for labels ("weekly downloads")
    pub fn adjective(&self) -> &'static str {
        match self {
            DownloadPeriod::LastDay => "daily",
            DownloadPeriod::LastWeek => "weekly",
            DownloadPeriod::LastMonth => "monthly",
            DownloadPeriod::LastYear => "yearly",
        }
    }
}

impl fmt::Display for DownloadPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadPeriod {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DownloadPeriod::ALL
            .into_iter()
            .find(|period| period.as_str() == s.trim())
            .ok_or_else(|| SiftError::InvalidRequest {
                field: "period".to_string(),
                reason: format!(
                    "'{}' is not one of last-day, last-week, last-month, last-year",
                    s
                ),
            })
    }
}

/// Downloads on a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub downloads: u64,
}

/// Sum of a download range
pub fn total_downloads(points: &[DownloadPoint]) -> u64 {
    points.iter().map(|point| point.downloads).sum()
}

/// Result of an enrichment lookup: the fetched value, or a default plus why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enriched<T> {
    Value(T),
    Degraded { value: T, reason: String },
}

impl<T> Enriched<T> {
    /// Degrade to `T::default()` with a reason
    pub fn degraded(reason: impl Into<String>) -> Self
    where
        T: Default,
    {
        Enriched::Degraded {
            value: T::default(),
            reason: reason.into(),
        }
    }

    /// The usable value, fetched or defaulted
    pub fn value(&self) -> &T {
        match self {
            Enriched::Value(value) => value,
            Enriched::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Enriched::Value(value) => value,
            Enriched::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Enriched::Degraded { .. })
    }

    /// Why the value was defaulted, if it was
    pub fn reason(&self) -> Option<&str> {
        match self {
            Enriched::Value(_) => None,
            Enriched::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Enriched<U> {
        match self {
            Enriched::Value(value) => Enriched::Value(f(value)),
            Enriched::Degraded { value, reason } => Enriched::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

impl<T: Default, E: fmt::Display> From<Result<T, E>> for Enriched<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Enriched::Value(value),
            Err(err) => Enriched::degraded(err.to_string()),
        }
    }
}
