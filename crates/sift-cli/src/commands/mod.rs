//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use sift_config::{ConfigLoader, Settings};
use sift_core::error::{SiftError, SiftResult};
use sift_registry::RegistryClient;
use std::collections::HashMap;
use tracing::debug;

pub mod downloads;
pub mod popular;
pub mod search;
pub mod show;
pub mod user;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub settings: Settings,
    pub client: RegistryClient,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Load configuration and build the registry client
    pub async fn new(cli_overrides: HashMap<String, String>, json: bool) -> SiftResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| SiftError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| SiftError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("{} is not valid UTF-8", path.display()),
        })?;

        let (settings, sources) = ConfigLoader::new(cwd).load_settings(cli_overrides).await?;
        for source in &sources {
            debug!("Loaded configuration from {}", source.path());
        }
        debug!(?settings, "resolved settings");

        Self::with_settings(settings, OutputHandler::new(json))
    }

    /// Context over already-resolved settings
    pub fn with_settings(settings: Settings, output: OutputHandler) -> SiftResult<Self> {
        let client = RegistryClient::with_config(settings.client_config())?;
        Ok(Self {
            settings,
            client,
            output,
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> SiftResult<()> {
    match command {
        Commands::Search { query, page, .. } => {
            debug!("Searching for {:?} (page {})", query, page);
            search::execute(query.join(" "), page, ctx).await
        }
        Commands::Show {
            segments,
            readme,
            all_versions,
            ..
        } => {
            debug!("Showing package {:?}", segments);
            show::execute(segments, show::ShowOptions { readme, all_versions }, ctx).await
        }
        Commands::User { username } => {
            debug!("Listing packages maintained by {}", username);
            user::execute(username, ctx).await
        }
        Commands::Popular { count } => {
            debug!("Listing {} popular packages", count);
            popular::execute(count, ctx).await
        }
        Commands::Downloads { name, .. } => {
            debug!("Showing downloads for {}", name);
            downloads::execute(name, ctx).await
        }
        Commands::Version => show_version(ctx),
    }
}

fn show_version(ctx: &CommandContext) -> SiftResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = env!("SIFT_TARGET");
    let rustc = env!("RUSTC_VERSION");

    if ctx.output.is_json() {
        return ctx.output.json(&serde_json::json!({
            "version": version,
            "built": build_date,
            "target": target,
            "rustc": rustc,
        }));
    }

    ctx.output.line(&format!("sift v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", rustc));

    Ok(())
}
