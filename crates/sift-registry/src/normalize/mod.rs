//! Registry document normalization
//!
//! Shapes a full [`PackageDocument`] into the [`PackageAggregate`] for one
//! resolved version, including the newest-first version list.

use std::cmp::Ordering;

use sift_core::error::SiftError;
use sift_core::types::{PackageAggregate, SearchHit, SearchPage, SearchScore, VersionRecord};
use sift_core::utils::format::parse_timestamp;

use crate::api::{PackageDocument, SearchObject, SearchResponse};
use crate::RegistryResult;

/// Pick the version a details request targets.
///
/// An explicit request wins; otherwise the `latest` dist-tag. Either way the
/// version must exist in the document.
pub fn resolve_version(document: &PackageDocument, requested: Option<&str>) -> RegistryResult<String> {
    let target = match requested {
        Some(version) => version,
        None => document.latest_version().unwrap_or("latest"),
    };

    if document.versions.contains_key(target) {
        Ok(target.to_string())
    } else {
        Err(SiftError::VersionNotFound {
            name: document.name.clone(),
            version: target.to_string(),
        })
    }
}

/// One record per published version, sorted newest first.
///
/// The sort is stable: equal timestamps keep the document's order. Versions
/// without a parseable time sort after all dated versions.
pub fn sorted_versions(document: &PackageDocument) -> Vec<VersionRecord> {
    let mut keyed: Vec<_> = document
        .versions
        .iter()
        .map(|(version, details)| {
            let date = document.time.get(version).cloned().unwrap_or_default();
            let parsed = parse_timestamp(&date);
            let record = VersionRecord {
                version: version.clone(),
                date,
                deprecated: details.deprecated.clone(),
            };
            (parsed, record)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Build the aggregate for `version`, which must be a key of `document.versions`
pub fn normalize(mut document: PackageDocument, version: &str) -> RegistryResult<PackageAggregate> {
    let versions = sorted_versions(&document);

    let details = document
        .versions
        .shift_remove(version)
        .ok_or_else(|| SiftError::VersionNotFound {
            name: document.name.clone(),
            version: version.to_string(),
        })?;

    let published_at = document.created().map(str::to_string);
    let updated_at = document.modified().map(str::to_string);
    let types = details.has_types();
    let engines = details.engines_map();
    let (unpacked_size, file_count) = details
        .dist
        .as_ref()
        .map(|dist| (dist.unpacked_size, dist.file_count))
        .unwrap_or((None, None));

    tracing::debug!(
        package = %document.name,
        version,
        versions = versions.len(),
        "normalized registry document"
    );

    Ok(PackageAggregate {
        name: document.name,
        version: version.to_string(),
        description: document.description.or(details.description),
        keywords: document.keywords,
        author: document.author,
        license: details.license.as_ref().map(|license| license.name().to_string()),
        homepage: document.homepage,
        repository: document.repository,
        readme: document.readme.filter(|readme| !readme.trim().is_empty()),
        dependencies: details.dependencies.unwrap_or_default(),
        dev_dependencies: details.dev_dependencies.unwrap_or_default(),
        peer_dependencies: details.peer_dependencies.unwrap_or_default(),
        engines,
        versions,
        maintainers: document.maintainers,
        published_at,
        updated_at,
        deprecated: details.deprecated,
        dist_tags: document.dist_tags,
        types,
        unpacked_size,
        file_count,
    })
}

/// Flatten a search envelope into display hits
pub fn search_page(response: SearchResponse) -> SearchPage {
    SearchPage {
        hits: response.objects.into_iter().map(search_hit).collect(),
        total: response.total,
    }
}

fn search_hit(object: SearchObject) -> SearchHit {
    let SearchObject { package, score } = object;
    // Older packages carry no author; the publisher is the next best name
    let author = package
        .author
        .as_ref()
        .map(|author| author.name().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| package.publisher.as_ref().map(|publisher| publisher.username.clone()));

    SearchHit {
        name: package.name,
        version: package.version,
        description: package.description,
        keywords: package.keywords,
        author,
        date: package.date,
        score: SearchScore {
            quality: score.detail.quality,
            popularity: score.detail.popularity,
            maintenance: score.detail.maintenance,
        }
        .clamped(),
        downloads: None,
    }
}
