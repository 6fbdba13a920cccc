//! # meshsync
//!
//! Operator CLI for meshsync cluster configuration and indexes.
//!
//! ## Commands
//!
//! - `show`: Print the local cluster configuration
//! - `export`: Write the local cluster configuration as a wire frame
//! - `compare`: Check a remote configuration against ours
//! - `index`: List the files of an index frame
//! - `id`: Derive a node ID from its certificate
//!
//! ## Example
//!
//! ```bash
//! # On node A, export what A announces
//! meshsync export --out node-a.bin
//!
//! # On node B, check that A agrees with B
//! meshsync compare --remote node-a.bin
//!
//! # Inspect a captured index
//! meshsync index default.idx --json
//!
//! # Node ID to put in the [node] table
//! meshsync id --cert cert.der
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) for diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{compare, export, id, index, show};
use config::Config;

/// Operator CLI for meshsync cluster configuration and indexes.
#[derive(Parser, Debug)]
#[command(name = "meshsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file declaring the shared repositories
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log diagnostics at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the local cluster configuration
    Show,

    /// Write the local cluster configuration as a wire frame
    Export {
        /// Output file
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Check a remote cluster configuration against ours
    Compare {
        /// Remote configuration: a TOML config file or an exported frame
        #[arg(long, short)]
        remote: PathBuf,
    },

    /// List the files of an index frame
    Index {
        /// Index frame to read
        path: PathBuf,

        /// Print JSON file summaries instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Derive a node ID from its DER certificate
    Id {
        /// Certificate file (DER)
        #[arg(long)]
        cert: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show => {
            let config = load_config(cli.config).await?;
            show::run(&config)?;
        }
        Commands::Export { out } => {
            let config = load_config(cli.config).await?;
            export::run(&config, &out).await?;
        }
        Commands::Compare { remote } => {
            let config = load_config(cli.config).await?;
            compare::run(&config, &remote).await?;
        }
        Commands::Index { path, json } => {
            index::run(&path, json).await?;
        }
        Commands::Id { cert } => {
            id::run(&cert).await?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(Config::from_file(&path).await?)
}

/// Get the default configuration file path.
fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "meshsync", "meshsync")
        .context("Could not determine home directory")?;
    Ok(dirs.config_dir().join("meshsync.toml"))
}
