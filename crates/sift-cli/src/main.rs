//! # sift-cli
//!
//! Browse and search the npm registry from the terminal.
//!
//! This is the main entry point for the Sift CLI tool. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use clap::{Parser, Subcommand};
use sift_core::error::{SiftError, SiftResult};
use std::collections::HashMap;
use std::process::ExitCode;
use tracing::{debug, error};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Browse and search the npm registry
#[derive(Parser)]
#[command(name = "sift", version, about = "Browse and search the npm registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Registry base URL
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search packages
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Result page, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Results per page
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show a package page
    Show {
        /// `name`, `name@version`, or route segments like `@babel parser v 7.0.0`
        #[arg(required = true, num_args = 1..)]
        segments: Vec<String>,
        /// Print the readme
        #[arg(long)]
        readme: bool,
        /// List every published version
        #[arg(long)]
        all_versions: bool,
        /// Download statistics window
        #[arg(long, value_name = "PERIOD")]
        period: Option<String>,
    },
    /// List packages a registry user maintains
    User {
        username: String,
    },
    /// List popular packages
    Popular {
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Show daily downloads of a package
    Downloads {
        name: String,
        /// Download statistics window
        #[arg(long, value_name = "PERIOD")]
        period: Option<String>,
    },
    /// Show version information
    Version,
}

impl Cli {
    /// Flags that override configuration files and environment
    fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();

        if let Some(registry) = &self.registry {
            overrides.insert("registry".to_string(), registry.clone());
        }

        match &self.command {
            Commands::Search {
                page_size: Some(size),
                ..
            } => {
                overrides.insert("page-size".to_string(), size.to_string());
            }
            Commands::Show {
                period: Some(period),
                ..
            }
            | Commands::Downloads {
                period: Some(period),
                ..
            } => {
                overrides.insert("period".to_string(), period.clone());
            }
            _ => {}
        }

        overrides
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting Sift CLI v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", ErrorFormatter::new().format_error(&err));
            exit_code_for(&err)
        }
    }
}

fn run_cli(cli: Cli) -> SiftResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| SiftError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let overrides = cli.config_overrides();
        let ctx = CommandContext::new(overrides, cli.json).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

/// Not-found errors exit with 2 so scripts can tell them apart
fn exit_code_for(err: &SiftError) -> ExitCode {
    if err.is_not_found() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sift={level},sift_core={level},sift_config={level},sift_registry={level}"
        ))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Sift encountered an unexpected error: {}", panic_info);
        eprintln!("Sift crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/sift-pkg/sift/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
