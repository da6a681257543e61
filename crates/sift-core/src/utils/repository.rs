//! Repository link extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Repository;

static GITHUB_REPO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com[/:]([A-Za-z0-9_-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?(?:#.*)?$")
        .expect("GitHub repository pattern is valid")
});

/// Canonical `https://github.com/<owner>/<repo>` link for a repository field
pub fn github_url(repository: &Repository) -> Option<String> {
    repository.url().and_then(github_url_from_str)
}

/// Same as [`github_url`] for a bare URL string
pub fn github_url_from_str(url: &str) -> Option<String> {
    let captures = GITHUB_REPO.captures(url)?;
    Some(format!("https://github.com/{}/{}", &captures[1], &captures[2]))
}
