//! Configuration layering, file discovery, and environment overrides
//!
//! Precedence, lowest first: built-in defaults, the global
//! `~/.sift/config.toml`, the nearest project `sift.toml`, `SIFT_*`
//! environment variables, then command-line flags.

use std::collections::HashMap;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use sift_core::error::SiftError;
use sift_core::types::search::DEFAULT_PAGE_SIZE;
use sift_core::types::DownloadPeriod;
use sift_registry::client::DEFAULT_CONCURRENCY;
use sift_registry::{AuthConfig, ClientConfig, Concurrency, DEFAULT_DOWNLOADS_URL, DEFAULT_REGISTRY_URL};

use crate::toml::{validate_page_size, validate_timeout, validate_url, SiftToml};
use crate::ConfigResult;

/// Project configuration file name
pub const PROJECT_CONFIG: &str = "sift.toml";

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "SIFT_";

/// Default listing size for maintainer pages
pub const DEFAULT_MAINTAINER_PAGE_SIZE: u32 = 50;

/// Fully resolved settings
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub registry_url: String,
    pub downloads_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub token: Option<String>,
    pub page_size: u32,
    pub maintainer_page_size: u32,
    /// `0` is unbounded
    pub concurrency: usize,
    pub period: DownloadPeriod,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            downloads_url: DEFAULT_DOWNLOADS_URL.to_string(),
            user_agent: concat!("sift/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            maintainer_page_size: DEFAULT_MAINTAINER_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            period: DownloadPeriod::default(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("registry_url", &self.registry_url)
            .field("downloads_url", &self.downloads_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .field("maintainer_page_size", &self.maintainer_page_size)
            .field("concurrency", &self.concurrency)
            .field("period", &self.period)
            .finish()
    }
}

impl Settings {
    /// Overlay every value the file sets
    fn apply_file(&mut self, file: &SiftToml) {
        if let Some(registry) = &file.registry {
            if let Some(url) = &registry.url {
                self.registry_url = url.clone();
            }
            if let Some(url) = &registry.downloads_url {
                self.downloads_url = url.clone();
            }
            if let Some(agent) = &registry.user_agent {
                self.user_agent = agent.clone();
            }
            if let Some(secs) = registry.timeout_secs {
                self.timeout = Duration::from_secs(secs);
            }
            if let Some(token) = &registry.token {
                self.token = Some(token.clone());
            }
        }

        if let Some(search) = &file.search {
            if let Some(size) = search.page_size {
                self.page_size = size;
            }
            if let Some(size) = search.maintainer_page_size {
                self.maintainer_page_size = size;
            }
            if let Some(concurrency) = search.concurrency {
                self.concurrency = concurrency;
            }
        }

        if let Some(period) = file.downloads.as_ref().and_then(|d| d.period) {
            self.period = period;
        }
    }

    /// Registry client settings derived from these
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            registry_url: self.registry_url.clone(),
            downloads_url: self.downloads_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            auth: self.token.as_ref().map(AuthConfig::bearer),
            concurrency: Concurrency::from_limit(self.concurrency),
        }
    }
}

/// Where a configuration layer came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project sift.toml file
    Project(Utf8PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Utf8Path {
        match self {
            ConfigSource::Global(path) | ConfigSource::Project(path) => path,
        }
    }
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Home directory holding `.sift/config.toml`
    home: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader rooted at `cwd`, using the user's home directory
    pub fn new(cwd: Utf8PathBuf) -> Self {
        let home = dirs::home_dir().and_then(|home| Utf8PathBuf::try_from(home).ok());
        Self { cwd, home }
    }

    /// Look for the global config under `home` instead
    pub fn with_home_dir(mut self, home: Option<Utf8PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Find a file in `cwd` or the nearest ancestor that has one
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join(filename))
            .find(|candidate| candidate.is_file())
    }

    /// Path of the global config file, whether or not it exists
    pub fn global_config_path(&self) -> Option<Utf8PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(".sift").join("config.toml"))
    }

    /// Load the nearest project sift.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(SiftToml, ConfigSource)>> {
        match self.resolve_config_path(PROJECT_CONFIG) {
            Some(path) => {
                let config = crate::toml::load_from_file(&path).await?;
                Ok(Some((config, ConfigSource::Project(path))))
            }
            None => Ok(None),
        }
    }

    /// Load global configuration
    pub async fn load_global_config(&self) -> ConfigResult<Option<(SiftToml, ConfigSource)>> {
        match self.global_config_path() {
            Some(path) if path.is_file() => {
                let config = crate::toml::load_from_file(&path).await?;
                Ok(Some((config, ConfigSource::Global(path))))
            }
            _ => Ok(None),
        }
    }

    /// Resolve settings from every layer, returning the files that contributed
    pub async fn load_settings(
        &self,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<(Settings, Vec<ConfigSource>)> {
        let global = self.load_global_config().await?;
        let project = self.load_project_config().await?;

        let sources = global
            .iter()
            .chain(project.iter())
            .map(|(_, source)| source.clone())
            .collect();

        let settings = ConfigLayering::merge_configs(
            global.map(|(config, _)| config),
            project.map(|(config, _)| config),
            ConfigLayering::collect_env_overrides(),
            cli_overrides,
        )?;

        Ok((settings, sources))
    }
}

/// Configuration layering and merging
pub struct ConfigLayering;

impl ConfigLayering {
    /// Merge multiple configuration layers over the defaults
    pub fn merge_configs(
        global_config: Option<SiftToml>,
        project_config: Option<SiftToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<Settings> {
        let mut merged = Settings::default();

        for layer in [global_config, project_config].iter().flatten() {
            merged.apply_file(layer);
        }

        Self::apply_env_overrides(&mut merged, &env_overrides)?;

        // Highest priority
        Self::apply_cli_overrides(&mut merged, &cli_overrides)?;

        Ok(merged)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "SIFT_REGISTRY_URL" => {
                    validate_url(key, value)?;
                    settings.registry_url = value.clone();
                }
                "SIFT_DOWNLOADS_URL" => {
                    validate_url(key, value)?;
                    settings.downloads_url = value.clone();
                }
                "SIFT_REGISTRY_TOKEN" => {
                    settings.token = Some(value.clone()).filter(|token| !token.is_empty());
                }
                "SIFT_USER_AGENT" => {
                    settings.user_agent = value.clone();
                }
                "SIFT_TIMEOUT_SECS" => {
                    let secs = parse_number(key, value)?;
                    validate_timeout(key, secs)?;
                    settings.timeout = Duration::from_secs(secs);
                }
                "SIFT_PAGE_SIZE" => {
                    let size = parse_number(key, value)?;
                    validate_page_size(key, size)?;
                    settings.page_size = size;
                }
                "SIFT_CONCURRENCY" => {
                    settings.concurrency = parse_number(key, value)?;
                }
                "SIFT_DOWNLOAD_PERIOD" => {
                    settings.period = parse_period(key, value)?;
                }
                _ => {
                    // Unknown environment variable, ignore
                }
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "registry" => {
                    validate_url("--registry", value)?;
                    settings.registry_url = value.clone();
                }
                "period" => {
                    settings.period = parse_period("--period", value)?;
                }
                "page-size" => {
                    let size = parse_number("--page-size", value)?;
                    validate_page_size("--page-size", size)?;
                    settings.page_size = size;
                }
                _ => {
                    // Unknown CLI override, ignore
                }
            }
        }

        Ok(())
    }

    /// Collect `SIFT_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_number<T>(field: &str, value: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| SiftError::ConfigValidation {
        field: field.to_string(),
        reason: format!("'{}' is not a valid number: {}", value, e),
    })
}

fn parse_period(field: &str, value: &str) -> ConfigResult<DownloadPeriod> {
    value.parse().map_err(|e: SiftError| SiftError::ConfigValidation {
        field: field.to_string(),
        reason: match e {
            SiftError::InvalidRequest { reason, .. } => reason,
            other => other.to_string(),
        },
    })
}
