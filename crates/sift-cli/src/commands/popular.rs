//! `sift popular` command implementation.

use chrono::Utc;
use sift_core::error::SiftResult;
use sift_registry::popular_with_downloads;

use super::CommandContext;
use crate::output::render;

/// Execute the `sift popular` command
pub async fn execute(count: u32, ctx: &CommandContext) -> SiftResult<()> {
    let page = popular_with_downloads(&ctx.client, count, ctx.settings.period).await?;

    if ctx.output.is_json() {
        return ctx.output.json(&page.hits);
    }

    print!(
        "{}",
        render::popular_packages(&page, ctx.settings.period, ctx.output.colors(), Utc::now())
    );
    Ok(())
}
