//! `sift show` command implementation.
//!
//! Accepts either route-style segments (`@babel parser v 7.0.0`,
//! `%40babel%2Fparser`) or a single `name@version` spec.

use chrono::Utc;
use sift_core::error::{SiftError, SiftResult};
use sift_core::types::PackageIdentity;
use sift_core::utils::decode_segment;
use sift_registry::fetch_package_page;

use super::CommandContext;
use crate::output::render::{self, PackageView};

pub use crate::output::render::ShowOptions;

/// Resolve command-line words to a package identity
pub fn resolve_identity(segments: &[String]) -> Option<PackageIdentity> {
    if let [single] = segments {
        let decoded = decode_segment(single);
        if decoded.rfind('@').is_some_and(|at| at > 0) {
            return PackageIdentity::parse(&decoded);
        }
    }
    PackageIdentity::from_segments(segments)
}

/// Execute the `sift show` command
pub async fn execute(segments: Vec<String>, options: ShowOptions, ctx: &CommandContext) -> SiftResult<()> {
    let identity = resolve_identity(&segments).ok_or_else(|| SiftError::PackageNotFound {
        name: segments.join("/"),
    })?;

    let page = fetch_package_page(
        &ctx.client,
        &identity.name,
        identity.version.as_deref(),
        ctx.settings.period,
    )
    .await?;

    if ctx.output.is_json() {
        return ctx.output.json(&PackageView::new(&page));
    }

    print!(
        "{}",
        render::package_page(&page, options, ctx.output.colors(), Utc::now())
    );
    Ok(())
}
