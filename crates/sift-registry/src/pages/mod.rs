//! View-level fetches: a primary lookup joined with download enrichment
//!
//! Each function here maps to one screen of the front end. The primary call
//! decides success or failure; download counts only ever decorate it.

use sift_core::types::{DownloadPeriod, Enriched, PackageAggregate, SearchHit, SearchOptions, SearchPage};

use crate::client::RegistryClient;
use crate::fanout::fan_out;
use crate::RegistryResult;

/// Package detail view
#[derive(Debug, Clone)]
pub struct PackagePage {
    pub package: PackageAggregate,
    pub downloads: Enriched<u64>,
    pub period: DownloadPeriod,
}

/// Details and download count for one package, fetched concurrently
pub async fn fetch_package_page(
    client: &RegistryClient,
    name: &str,
    version: Option<&str>,
    period: DownloadPeriod,
) -> RegistryResult<PackagePage> {
    let (package, downloads) = tokio::join!(
        client.fetch_details(name, version),
        client.download_count(name, period),
    );

    Ok(PackagePage {
        package: package?,
        downloads,
        period,
    })
}

/// Attach a download count to every hit, keeping hit order
pub async fn enrich_with_downloads(
    client: &RegistryClient,
    hits: Vec<SearchHit>,
    period: DownloadPeriod,
) -> Vec<SearchHit> {
    fan_out(hits, client.concurrency(), |hit| async move {
        let downloads = client.download_count(&hit.name, period).await.into_value();
        hit.with_downloads(downloads)
    })
    .await
}

/// One search page with download counts filled in
pub async fn search_with_downloads(
    client: &RegistryClient,
    query: &str,
    options: SearchOptions,
    period: DownloadPeriod,
) -> RegistryResult<SearchPage> {
    let page = client.search(query, options).await?;
    tracing::debug!(query, hits = page.hits.len(), total = page.total, "search complete");

    let hits = enrich_with_downloads(client, page.hits, period).await;
    Ok(SearchPage {
        hits,
        total: page.total,
    })
}

/// Packages maintained by `username`, with download counts
pub async fn maintainer_packages(
    client: &RegistryClient,
    username: &str,
    size: u32,
    period: DownloadPeriod,
) -> RegistryResult<SearchPage> {
    let page = client.search_maintainer(username, size).await?;
    let hits = enrich_with_downloads(client, page.hits, period).await;
    Ok(SearchPage {
        hits,
        total: page.total,
    })
}

/// Popular listing with download counts
pub async fn popular_with_downloads(
    client: &RegistryClient,
    count: u32,
    period: DownloadPeriod,
) -> RegistryResult<SearchPage> {
    let page = client.popular_packages(count).await?;
    let hits = enrich_with_downloads(client, page.hits, period).await;
    Ok(SearchPage {
        hits,
        total: page.total,
    })
}
