//! Text and JSON views for each screen.
//!
//! Text renderers are pure: they take the clock and color support as
//! arguments and return the whole screen as a string.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sift_core::types::{
    sorted_entries, total_downloads, DependencyKind, DownloadPeriod, DownloadPoint, Pagination,
    SearchHit, SearchPage,
};
use sift_core::utils::{
    format_downloads, format_file_size, format_relative_time, github_url, install_commands,
    InstallCommand,
};
use sift_registry::PackagePage;

use super::colors::ColorSupport;

/// Versions listed before `--all-versions` is needed
pub const VERSIONS_SHOWN: usize = 10;

/// Optional sections of a package page
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub readme: bool,
    pub all_versions: bool,
}

/// Search results with a pagination summary; counts are for `period`
pub fn search_results(
    query: &str,
    page: &SearchPage,
    pagination: &Pagination,
    period: DownloadPeriod,
    colors: &ColorSupport,
    now: DateTime<Utc>,
) -> String {
    if page.is_empty() {
        return format!("No packages found for \"{}\"\n", query);
    }

    let (first, last) = pagination.shown_range();
    let mut out = format!(
        "{} packages found for \"{}\"  {}\n\n",
        pagination.total,
        query,
        colors.dim(&format!(
            "showing {}-{} (page {} of {})",
            first,
            last,
            pagination.page,
            pagination.total_pages()
        ))
    );

    for hit in &page.hits {
        out.push_str(&hit_card(hit, period, colors, now));
        out.push('\n');
    }

    if pagination.has_prev() {
        out.push_str(&colors.dim(&format!(
            "Previous: sift search {} --page {}\n",
            query,
            pagination.page - 1
        )));
    }
    if pagination.has_next() {
        out.push_str(&colors.dim(&format!(
            "Next: sift search {} --page {}\n",
            query,
            pagination.page + 1
        )));
    }

    out
}

/// Packages published by one maintainer
pub fn maintainer_packages(
    username: &str,
    page: &SearchPage,
    period: DownloadPeriod,
    colors: &ColorSupport,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!(
        "{}\n{}\n\n",
        colors.bold(username),
        colors.dim(&format!("{} packages published", page.total))
    );

    if page.is_empty() {
        out.push_str("No packages found\n");
        return out;
    }

    for hit in &page.hits {
        out.push_str(&hit_card(hit, period, colors, now));
        out.push('\n');
    }
    out
}

/// Numbered popular listing
pub fn popular_packages(
    page: &SearchPage,
    period: DownloadPeriod,
    colors: &ColorSupport,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!("{}\n\n", colors.bold("Popular packages"));
    for (rank, hit) in page.hits.iter().enumerate() {
        out.push_str(&format!("{:>2}. ", rank + 1));
        out.push_str(&hit_card(hit, period, colors, now));
        out.push('\n');
    }
    out
}

fn hit_card(
    hit: &SearchHit,
    period: DownloadPeriod,
    colors: &ColorSupport,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!("{} {}", colors.bold(&hit.name), colors.dim(&hit.version));
    if let Some(downloads) = hit.downloads {
        out.push_str(&format!(
            "  {} {}",
            colors.green(&format_downloads(downloads)),
            period.adjective()
        ));
    }
    out.push('\n');

    if let Some(description) = hit.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("    {}\n", description));
    }

    let mut meta = Vec::new();
    if let Some(author) = &hit.author {
        meta.push(format!("by {}", author));
    }
    if let Some(date) = &hit.date {
        meta.push(format_relative_time(date, now));
    }
    if !hit.keywords.is_empty() {
        meta.push(format!("keywords: {}", hit.keywords.join(", ")));
    }
    if !meta.is_empty() {
        out.push_str(&format!("    {}\n", colors.dim(&meta.join(" · "))));
    }

    out.push_str(&format!(
        "    {}\n",
        colors.dim(&format!(
            "quality {:.0}%  popularity {:.0}%  maintenance {:.0}%",
            hit.score.quality * 100.0,
            hit.score.popularity * 100.0,
            hit.score.maintenance * 100.0
        ))
    ));
    out
}

/// Full package page
pub fn package_page(
    page: &PackagePage,
    options: ShowOptions,
    colors: &ColorSupport,
    now: DateTime<Utc>,
) -> String {
    let package = &page.package;
    let mut out = format!("{} {}\n", colors.bold(&package.name), colors.cyan(&package.version));

    if let Some(description) = &package.description {
        out.push_str(description);
        out.push('\n');
    }

    if let Some(message) = &package.deprecated {
        out.push('\n');
        out.push_str(&colors.yellow(&format!("⚠ Deprecated: {}", message)));
        out.push('\n');
    }

    // Stats
    out.push('\n');
    let mut downloads = format_downloads(*page.downloads.value());
    if page.downloads.is_degraded() {
        downloads.push_str(&colors.dim(" (unavailable)"));
    }
    let mut stats = vec![(format!("{} downloads", capitalize(page.period.adjective())), downloads)];
    stats.push((
        "License".to_string(),
        package.license.clone().unwrap_or_else(|| "none".to_string()),
    ));
    if let Some(size) = package.unpacked_size {
        stats.push(("Unpacked size".to_string(), format_file_size(size)));
    }
    if let Some(files) = package.file_count {
        stats.push(("Files".to_string(), files.to_string()));
    }
    stats.push((
        "Types".to_string(),
        if package.types { "included" } else { "none" }.to_string(),
    ));
    if let Some(published) = &package.published_at {
        stats.push(("Created".to_string(), format_relative_time(published, now)));
    }
    if let Some(updated) = &package.updated_at {
        stats.push(("Updated".to_string(), format_relative_time(updated, now)));
    }
    if let Some(homepage) = &package.homepage {
        stats.push(("Homepage".to_string(), homepage.clone()));
    }
    if let Some(github) = package.repository.as_ref().and_then(github_url) {
        stats.push(("GitHub".to_string(), github));
    }
    out.push_str(&aligned(&stats, colors));

    // Install
    out.push('\n');
    out.push_str(&colors.bold("Install"));
    out.push('\n');
    let commands: Vec<(String, String)> = install_commands(&package.name)
        .into_iter()
        .map(|install| (install.manager.to_string(), install.command))
        .collect();
    out.push_str(&aligned(&commands, colors));

    // Dependencies
    out.push('\n');
    if package.has_no_dependencies() {
        out.push_str(&colors.dim("No dependencies"));
        out.push('\n');
    } else {
        for kind in DependencyKind::ALL {
            let deps = package.dependencies_of(kind);
            if deps.is_empty() {
                continue;
            }
            out.push_str(&colors.bold(&format!("{} ({})", kind.title(), deps.len())));
            out.push('\n');
            let rows: Vec<(String, String)> = sorted_entries(deps)
                .into_iter()
                .map(|(name, range)| (name.to_string(), range.to_string()))
                .collect();
            out.push_str(&aligned(&rows, colors));
        }
    }

    // Versions
    out.push('\n');
    let total = package.versions.len();
    let shown = if options.all_versions {
        total
    } else {
        total.min(VERSIONS_SHOWN)
    };
    out.push_str(&colors.bold(&format!("Versions ({})", total)));
    out.push('\n');
    let width = package.versions[..shown]
        .iter()
        .map(|record| record.version.len())
        .max()
        .unwrap_or(0);
    for record in &package.versions[..shown] {
        let mut line = format!(
            "  {:<width$}  {}",
            record.version,
            format_relative_time(&record.date, now),
            width = width
        );
        let tags = package.tags_for(&record.version);
        if !tags.is_empty() {
            line.push_str(&format!("  {}", colors.cyan(&tags.join(", "))));
        }
        if record.is_deprecated() {
            line.push_str(&format!("  {}", colors.yellow("deprecated")));
        }
        if record.version == package.version {
            line = colors.bold(&line);
        }
        out.push_str(&line);
        out.push('\n');
    }
    if shown < total {
        out.push_str(&colors.dim(&format!(
            "  ... {} more (use --all-versions)",
            total - shown
        )));
        out.push('\n');
    }

    if !package.keywords.is_empty() {
        out.push('\n');
        out.push_str(&format!("{} {}\n", colors.bold("Keywords:"), package.keywords.join(", ")));
    }
    if !package.maintainers.is_empty() {
        let names: Vec<&str> = package.maintainers.iter().map(|m| m.name.as_str()).collect();
        out.push_str(&format!("{} {}\n", colors.bold("Maintainers:"), names.join(", ")));
    }

    if options.readme {
        out.push('\n');
        out.push_str(&colors.bold("Readme"));
        out.push('\n');
        match &package.readme {
            Some(readme) => {
                out.push_str(readme.trim_end());
                out.push('\n');
            }
            None => {
                out.push_str(&colors.dim("No readme"));
                out.push('\n');
            }
        }
    }

    out
}

/// Daily downloads with the range total
pub fn download_range(
    name: &str,
    period: DownloadPeriod,
    points: &[DownloadPoint],
    colors: &ColorSupport,
) -> String {
    if points.is_empty() {
        return format!("No download data for {} over {}\n", name, period);
    }

    let mut out = format!("{} {}\n\n", colors.bold(name), colors.dim(&format!("downloads over {}", period)));
    let width = points
        .iter()
        .map(|point| point.downloads.to_string().len())
        .max()
        .unwrap_or(0);
    for point in points {
        out.push_str(&format!(
            "  {}  {:>width$}\n",
            point.date,
            point.downloads,
            width = width
        ));
    }
    let total = total_downloads(points);
    out.push_str(&format!(
        "\n  {}  {} ({})\n",
        colors.bold("Total"),
        total,
        format_downloads(total)
    ));
    out
}

/// Two-column rows with the first column padded
fn aligned(rows: &[(String, String)], colors: &ColorSupport) -> String {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let padding = " ".repeat(width - label.chars().count());
            format!("  {}{}  {}\n", colors.dim(label), padding, value)
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// JSON shape of a search listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView<'a> {
    pub query: &'a str,
    pub page: u64,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub hits: &'a [SearchHit],
}

impl<'a> SearchView<'a> {
    pub fn new(query: &'a str, page: &'a SearchPage, pagination: &Pagination) -> Self {
        Self {
            query,
            page: pagination.page,
            per_page: pagination.per_page,
            total: page.total,
            total_pages: pagination.total_pages(),
            hits: &page.hits,
        }
    }
}

/// JSON shape of download statistics
#[derive(Debug, Serialize)]
pub struct DownloadsView<'a> {
    pub period: DownloadPeriod,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<&'a str>,
}

/// JSON shape of a package page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView<'a> {
    #[serde(flatten)]
    pub package: &'a sift_core::types::PackageAggregate,
    pub downloads: DownloadsView<'a>,
    pub install: Vec<InstallCommand>,
    pub github: Option<String>,
}

impl<'a> PackageView<'a> {
    pub fn new(page: &'a PackagePage) -> Self {
        Self {
            package: &page.package,
            downloads: DownloadsView {
                period: page.period,
                count: *page.downloads.value(),
                unavailable: page.downloads.reason(),
            },
            install: install_commands(&page.package.name),
            github: page.package.repository.as_ref().and_then(github_url),
        }
    }
}
