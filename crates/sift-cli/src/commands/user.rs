//! `sift user` command implementation.

use chrono::Utc;
use sift_core::error::SiftResult;
use sift_registry::maintainer_packages;

use super::CommandContext;
use crate::output::render;

/// Execute the `sift user` command
pub async fn execute(username: String, ctx: &CommandContext) -> SiftResult<()> {
    let page = maintainer_packages(
        &ctx.client,
        &username,
        ctx.settings.maintainer_page_size,
        ctx.settings.period,
    )
    .await?;

    if ctx.output.is_json() {
        return ctx.output.json(&page);
    }

    print!(
        "{}",
        render::maintainer_packages(
            &username,
            &page,
            ctx.settings.period,
            ctx.output.colors(),
            Utc::now(),
        )
    );
    Ok(())
}
