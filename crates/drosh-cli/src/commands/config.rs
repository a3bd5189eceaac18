//! Config command - inspect the effective configuration
//!
//! The configuration shown is the merged result of defaults, the config
//! file and `DROSH_*` environment variables. The access token is masked.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use drosh_core::config::{Config, ConfigError};
use tracing::info;

use crate::output::{get_formatter, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Check the configuration and report every problem found
    Validate,
}

impl ConfigCommand {
    pub async fn execute(
        &self,
        config: &Config,
        config_path: Option<&Path>,
        format: OutputFormat,
    ) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(config, config_path, format),
            ConfigCommand::Validate => execute_validate(config, format),
        }
    }
}

/// Describes where the configuration was read from
fn source_label(config_path: Option<&Path>) -> String {
    let path: PathBuf = match config_path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = Config::default_path();
            if !default.is_file() {
                return "defaults".to_string();
            }
            default
        }
    };
    path.display().to_string()
}

fn execute_show(config: &Config, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    let source = source_label(config_path);
    let redacted = config.redacted();

    info!(source = %source, "Showing configuration");

    if matches!(format, OutputFormat::Json) {
        let json =
            serde_json::to_value(&redacted).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", source));
        formatter.info("");

        let yaml =
            serde_yaml::to_string(&redacted).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }

    Ok(())
}

/// Every problem with `config`, including required values that are unset
fn collect_problems(config: &Config) -> Vec<String> {
    let mut problems: Vec<String> = config
        .validate()
        .iter()
        .map(ToString::to_string)
        .collect();

    let required = [
        config.access_token().err(),
        config.screenshot_folder().err(),
        // An invalid remote folder is already reported by validate()
        config
            .remote_folder()
            .err()
            .filter(|e| matches!(e, ConfigError::Missing { .. })),
    ];
    problems.extend(required.into_iter().flatten().map(|e| e.to_string()));
    problems
}

fn execute_validate(config: &Config, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    let problems = collect_problems(config);

    if matches!(format, OutputFormat::Json) {
        formatter.print_json(&serde_json::json!({
            "valid": problems.is_empty(),
            "errors": problems,
        }));
    } else if problems.is_empty() {
        formatter.success("Configuration is valid");
    } else {
        formatter.error(&format!("Configuration has {} problem(s)", problems.len()));
        for problem in &problems {
            formatter.info(problem);
        }
    }

    if !problems.is_empty() {
        bail!("Configuration is invalid");
    }
    Ok(())
}
