// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logos - local credential guard for the journal's API key.
//!
//! This is the binary entry point. Every command opens the configured store,
//! runs the legacy plaintext migration, then acts on the guard.

mod secret;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use logos_config::model::LogosConfig;
use logos_core::LogosError;
use logos_guard::{CredentialGuard, startup_check};
use logos_storage::SqliteStore;
use tracing::{info, warn};

/// Logos - keep the journal's API key out of plain sight.
#[derive(Parser, Debug)]
#[command(name = "logos", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Encrypt and store an API key (from LOGOS_API_KEY or a prompt).
    Save,
    /// Show the stored API key, masked unless --reveal is given.
    Show {
        /// Print the full key.
        #[arg(long)]
        reveal: bool,
    },
    /// Report whether a key is stored and when it was saved.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove the stored key and its key material.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => logos_config::load_and_validate_path(path),
        None => logos_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            logos_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli, config).await {
        eprintln!("logos: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: LogosConfig) -> Result<(), LogosError> {
    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    info!(path = %config.storage.database_path, "local store opened");
    let guard = CredentialGuard::new(store.clone());

    let report = startup_check(&guard, &config.guard).await?;
    for warning in &report.warnings {
        warn!("{}", warning);
    }

    let result = match cli.command {
        Commands::Save => secret::run_save(&guard, cli.plain).await,
        Commands::Show { reveal } => secret::run_show(&guard, reveal).await,
        Commands::Status { json } => status::run_status(&guard, json, cli.plain).await,
        Commands::Clear { yes } => secret::run_clear(&guard, yes).await,
    };

    store.close().await?;
    result
}

/// Crates whose events follow `logging.level`; everything else logs at warn.
const LOG_TARGETS: [&str; 5] = [
    "logos",
    "logos_config",
    "logos_core",
    "logos_guard",
    "logos_storage",
];

/// Validation accepts any case and surrounding whitespace; directives do not.
fn default_filter(log_level: &str) -> String {
    let log_level = log_level.trim().to_ascii_lowercase();
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over the configured level. Events go to stderr
/// so command output on stdout stays scriptable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
