//! `sift search` command implementation.
//!
//! Runs one page of a registry search and decorates each hit with its
//! download count before rendering.

use chrono::Utc;
use sift_core::error::SiftResult;
use sift_core::types::{Pagination, SearchOptions};
use sift_registry::search_with_downloads;

use super::CommandContext;
use crate::output::render::{self, SearchView};

/// Execute the `sift search` command
pub async fn execute(query: String, page: u64, ctx: &CommandContext) -> SiftResult<()> {
    let per_page = ctx.settings.page_size;
    let options = SearchOptions::for_page(page, per_page)?;

    let results = search_with_downloads(&ctx.client, &query, options, ctx.settings.period).await?;
    let pagination = Pagination::new(page, per_page, results.total);

    if ctx.output.is_json() {
        return ctx.output.json(&SearchView::new(&query, &results, &pagination));
    }

    print!(
        "{}",
        render::search_results(
            &query,
            &results,
            &pagination,
            ctx.settings.period,
            ctx.output.colors(),
            Utc::now(),
        )
    );
    Ok(())
}
