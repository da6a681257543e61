//! `sift downloads` command implementation.
//!
//! Missing statistics are not an error: the range degrades to empty and the
//! command prints a notice instead.

use serde::Serialize;
use sift_core::error::SiftResult;
use sift_core::types::{total_downloads, DownloadPeriod, DownloadPoint};

use super::CommandContext;
use crate::output::render;

#[derive(Serialize)]
struct DownloadsReport<'a> {
    package: &'a str,
    period: DownloadPeriod,
    total: u64,
    days: &'a [DownloadPoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    unavailable: Option<&'a str>,
}

/// Execute the `sift downloads` command
pub async fn execute(name: String, ctx: &CommandContext) -> SiftResult<()> {
    let period = ctx.settings.period;
    let range = ctx.client.download_range(&name, period).await;

    if ctx.output.is_json() {
        return ctx.output.json(&DownloadsReport {
            package: &name,
            period,
            total: total_downloads(range.value()),
            days: range.value(),
            unavailable: range.reason(),
        });
    }

    if let Some(reason) = range.reason() {
        ctx.output.warn(&format!("Download statistics unavailable: {}", reason));
    }
    print!(
        "{}",
        render::download_range(&name, period, range.value(), ctx.output.colors())
    );
    Ok(())
}
