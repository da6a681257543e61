//! Search result summaries and pagination math.

use serde::{Deserialize, Serialize};

use crate::error::{SiftError, SiftResult};

/// Default number of results per search page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the registry search endpoint serves
pub const MAX_PAGE_SIZE: u32 = 250;

/// Registry score triple, each component in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchScore {
    pub quality: f64,
    pub popularity: f64,
    pub maintenance: f64,
}

impl SearchScore {
    /// Clamp each component into `0.0..=1.0`
    pub fn clamped(self) -> Self {
        Self {
            quality: self.quality.clamp(0.0, 1.0),
            popularity: self.popularity.clamp(0.0, 1.0),
            maintenance: self.maintenance.clamp(0.0, 1.0),
        }
    }
}

/// Summary of one package in a search listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub score: SearchScore,
    /// Filled in after the search, from the downloads service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

impl SearchHit {
    /// Attach a download count
    pub fn with_downloads(mut self, downloads: u64) -> Self {
        self.downloads = Some(downloads);
        self
    }
}

/// One page of search results plus the total match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub total: u64,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Page window for a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub size: u32,
    pub from: u64,
}

impl SearchOptions {
    /// Create validated search options
    pub fn new(size: u32, from: u64) -> SiftResult<Self> {
        let options = Self { size, from };
        options.validate()?;
        Ok(options)
    }

    /// Options for a 1-based page number
    pub fn for_page(page: u64, per_page: u32) -> SiftResult<Self> {
        let pagination = Pagination::new(page, per_page, 0);
        Self::new(per_page, pagination.from())
    }

    /// Check `size` is within `1..=MAX_PAGE_SIZE`
    pub fn validate(&self) -> SiftResult<()> {
        if self.size == 0 || self.size > MAX_PAGE_SIZE {
            return Err(SiftError::InvalidRequest {
                field: "size".to_string(),
                reason: format!("must be between 1 and {}, got {}", MAX_PAGE_SIZE, self.size),
            });
        }
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            from: 0,
        }
    }
}

/// Pagination math for a result listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub page: u64,
    pub per_page: u32,
    pub total: u64,
}

impl Pagination {
    /// Page numbers below 1 clamp to 1
    pub fn new(page: u64, per_page: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            total,
        }
    }

    /// Zero-based offset of the first result on this page
    pub fn from(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.per_page))
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// 1-based inclusive range of results shown on this page
    pub fn shown_range(&self) -> (u64, u64) {
        let start = self.from().saturating_add(1);
        let end = self
            .from()
            .saturating_add(u64::from(self.per_page))
            .min(self.total);
        (start, end)
    }
}
