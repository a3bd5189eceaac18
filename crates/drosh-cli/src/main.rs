//! Drosh CLI - Command-line interface for Drosh
//!
//! Provides commands for:
//! - Uploading and sharing a single screenshot
//! - Watching the screenshot folder
//! - Inspecting and validating configuration
//! - Generating shell completions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drosh_core::config::{Config, LoggingConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, config::ConfigCommand, upload::UploadCommand,
    watch::WatchCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "drosh",
    version,
    about = "Upload screenshots to Dropbox and share the link"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload one file and copy its shared link
    Upload(UploadCommand),
    /// Watch the screenshot folder and share every new screenshot
    Watch(WatchCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Filter directive used when `RUST_LOG` is not set
///
/// `-v` flags take precedence over the configured level.
fn default_filter(verbose: u8, configured_level: &str) -> &str {
    match verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, logging: &LoggingConfig) {
    let filter = default_filter(verbose, &logging.level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Loads the configuration, then sets up tracing from its logging section
///
/// A load failure is reported only after tracing is up.
fn load_config(path: Option<&Path>, verbose: u8) -> Result<Config> {
    let config = Config::from_sources(path);
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(verbose, &logging);
    config.context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Upload(cmd) => {
            let config = load_config(config_path, cli.verbose)?;
            cmd.execute(&config, format).await
        }
        Commands::Watch(cmd) => {
            let config = load_config(config_path, cli.verbose)?;
            cmd.execute(&config, format).await
        }
        Commands::Config(cmd) => {
            let config = load_config(config_path, cli.verbose)?;
            cmd.execute(&config, config_path, format).await
        }
        // Needs no configuration, so a broken config file cannot block it
        Commands::Completions(cmd) => cmd.execute(format).await,
    }
}
