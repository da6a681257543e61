//! Download statistics lookups
//!
//! These decorate primary content, so they never fail: any transport error,
//! non-success status or undecodable body degrades to an empty value and is
//! logged.

use serde::de::DeserializeOwned;

use sift_core::types::{DownloadPeriod, DownloadPoint, Enriched};
use sift_core::utils::encode_package_name;

use super::RegistryClient;
use crate::api::{DownloadPointResponse, DownloadRangeResponse};

impl RegistryClient {
    /// Total downloads of `package_name` over `period`, `0` when unavailable
    pub async fn download_count(&self, package_name: &str, period: DownloadPeriod) -> Enriched<u64> {
        let url = format!(
            "{}/point/{}/{}",
            self.downloads_url,
            period,
            encode_package_name(package_name)
        );

        let enriched: Enriched<u64> = self
            .downloads_get::<DownloadPointResponse>(&url)
            .await
            .map(|body| body.downloads.unwrap_or(0))
            .into();

        log_degraded(package_name, &enriched);
        enriched
    }

    /// Daily downloads of `package_name` over `period`, empty when unavailable
    pub async fn download_range(
        &self,
        package_name: &str,
        period: DownloadPeriod,
    ) -> Enriched<Vec<DownloadPoint>> {
        let url = format!(
            "{}/range/{}/{}",
            self.downloads_url,
            period,
            encode_package_name(package_name)
        );

        let enriched: Enriched<Vec<DownloadPoint>> = self
            .downloads_get::<DownloadRangeResponse>(&url)
            .await
            .map(|body| {
                body.downloads
                    .into_iter()
                    .map(|day| DownloadPoint {
                        date: day.day,
                        downloads: day.downloads,
                    })
                    .collect()
            })
            .into();

        log_degraded(package_name, &enriched);
        enriched
    }

    async fn downloads_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        tracing::debug!(url, "downloads request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("downloads service returned {}", status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("invalid response body: {}", e))
    }
}

fn log_degraded<T>(package_name: &str, enriched: &Enriched<T>) {
    if let Some(reason) = enriched.reason() {
        tracing::warn!(package = package_name, reason, "download statistics unavailable");
    }
}
