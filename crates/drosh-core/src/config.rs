//! Configuration module for Drosh.
//!
//! Provides typed configuration structs that map to an optional YAML file,
//! with defaults, environment overrides, validation, and resolution of the
//! values the screenshot pipeline needs.
//!
//! Loading order: built-in defaults, then the YAML file, then the
//! `DROSH_*` environment variables. The resulting value is immutable and
//! passed explicitly to every component.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RemotePath;

/// Environment variable holding the Dropbox access token.
pub const ENV_TOKEN: &str = "DROSH_DROPBOX_TOKEN";
/// Environment variable holding the remote base folder.
pub const ENV_REMOTE_FOLDER: &str = "DROSH_DROPBOX_FOLDER";
/// Environment variable holding the local screenshot folder.
pub const ENV_SCREENSHOT_FOLDER: &str = "DROSH_SCREENSHOT_FOLDER";

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Drosh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub watch: WatchConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationsConfig,
}

/// Remote storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bearer credential for the storage API.
    pub access_token: Option<String>,
    /// Absolute remote folder screenshots are uploaded into.
    pub remote_folder: Option<String>,
    /// Per-request connection/operation timeout in seconds.
    pub timeout_secs: u64,
}

/// Screenshot folder watch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Folder the screenshot tool writes into. Required for watch mode.
    pub screenshot_folder: Option<PathBuf>,
    /// Glob patterns matched against file names; matches are ignored.
    pub ignore_patterns: Vec<String>,
}

/// Retry budgets for the upload and link stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts to observe a non-empty local file.
    pub file_ready_attempts: u32,
    /// Wait between file readiness attempts, in milliseconds.
    pub file_ready_interval_ms: u64,
    /// Total attempts to obtain a shared link.
    pub link_attempts: u32,
    /// Backoff step for link attempts; attempt `i` waits `i * step`.
    pub link_backoff_step_ms: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Output format: `text` or `json`.
    pub format: String,
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Title used for every notification.
    pub title: String,
    /// How long a popup stays visible, in seconds.
    pub timeout_secs: u32,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            remote_folder: None,
            timeout_secs: 30,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            screenshot_folder: None,
            ignore_patterns: vec![
                ".*".to_string(),
                "*.tmp".to_string(),
                "*.part".to_string(),
                "*~".to_string(),
            ],
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            file_ready_attempts: 7,
            file_ready_interval_ms: 1000,
            link_attempts: 6,
            link_backoff_step_ms: 1500,
        }
    }
}

impl RetryConfig {
    /// Wait between two file readiness probes.
    pub fn file_ready_interval(&self) -> Duration {
        Duration::from_millis(self.file_ready_interval_ms)
    }

    /// Wait after the failed link attempt with zero-based index `attempt`.
    pub fn link_backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.link_backoff_step_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            title: "Drosh".to_string(),
            timeout_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"retry.link_attempts"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while loading or resolving the configuration.
///
/// All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value is absent from both the file and the environment
    #[error("Missing required setting {field} (set {env_var})")]
    Missing {
        field: &'static str,
        env_var: &'static str,
    },

    /// One or more values failed validation
    #[error("Invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// The configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`Config`]
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drosh/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drosh")
            .join("config.yaml")
    }

    /// Builds the effective configuration for this process.
    ///
    /// An explicit `path` must exist and parse. Without one, the default
    /// path is used if present. Environment variables are applied last.
    pub fn from_sources(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => {
                let default = Self::default_path();
                if default.is_file() {
                    Self::load(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Applies `DROSH_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies overrides using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_TOKEN) {
            self.storage.access_token = Some(token);
        }
        if let Some(folder) = get(ENV_REMOTE_FOLDER) {
            self.storage.remote_folder = Some(folder);
        }
        if let Some(folder) = get(ENV_SCREENSHOT_FOLDER) {
            self.watch.screenshot_folder = Some(PathBuf::from(folder));
        }
    }

    /// Returns a copy safe to print, with the access token masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.storage.access_token.is_some() {
            copy.storage.access_token = Some("********".to_string());
        }
        copy
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid values for `logging.format`.
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Required values
    /// are not checked here; see [`Config::access_token`] and friends.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- storage ---
        if self.storage.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "storage.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if let Some(folder) = &self.storage.remote_folder {
            if let Err(e) = RemotePath::new(folder.clone()) {
                errors.push(ValidationError {
                    field: "storage.remote_folder".into(),
                    message: e.to_string(),
                });
            }
        }

        // --- watch ---
        for pattern in &self.watch.ignore_patterns {
            if let Err(e) = glob::Pattern::new(pattern) {
                errors.push(ValidationError {
                    field: "watch.ignore_patterns".into(),
                    message: format!("invalid pattern '{}': {}", pattern, e),
                });
            }
        }

        // --- retry ---
        if self.retry.file_ready_attempts == 0 {
            errors.push(ValidationError {
                field: "retry.file_ready_attempts".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.retry.link_attempts == 0 {
            errors.push(ValidationError {
                field: "retry.link_attempts".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }
        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            errors.push(ValidationError {
                field: "logging.format".into(),
                message: format!(
                    "invalid format '{}'; valid options: {}",
                    self.logging.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        // --- notifications ---
        if self.notifications.title.trim().is_empty() {
            errors.push(ValidationError {
                field: "notifications.title".into(),
                message: "must not be empty".into(),
            });
        }
        if self.notifications.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "notifications.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        errors
    }

    /// Like [`Config::validate`], but as a `Result`.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Required values
// ---------------------------------------------------------------------------

impl Config {
    /// The storage access token.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.storage
            .access_token
            .as_deref()
            .ok_or(ConfigError::Missing {
                field: "storage.access_token",
                env_var: ENV_TOKEN,
            })
    }

    /// The remote base folder as a validated path.
    pub fn remote_folder(&self) -> Result<RemotePath, ConfigError> {
        let raw = self
            .storage
            .remote_folder
            .clone()
            .ok_or(ConfigError::Missing {
                field: "storage.remote_folder",
                env_var: ENV_REMOTE_FOLDER,
            })?;
        RemotePath::new(raw).map_err(|e| {
            ConfigError::Invalid(vec![ValidationError {
                field: "storage.remote_folder".into(),
                message: e.to_string(),
            }])
        })
    }

    /// The local folder to watch.
    pub fn screenshot_folder(&self) -> Result<&Path, ConfigError> {
        self.watch
            .screenshot_folder
            .as_deref()
            .ok_or(ConfigError::Missing {
                field: "watch.screenshot_folder",
                env_var: ENV_SCREENSHOT_FOLDER,
            })
    }

    /// Resolves the settings the screenshot pipeline runs with.
    ///
    /// `local_folder` is the directory event file names are relative to:
    /// the watched folder in watch mode, the file's parent in single-shot
    /// mode.
    pub fn pipeline_settings(
        &self,
        local_folder: impl Into<PathBuf>,
    ) -> Result<PipelineSettings, ConfigError> {
        self.ensure_valid()?;
        Ok(PipelineSettings {
            local_folder: local_folder.into(),
            remote_folder: self.remote_folder()?,
            retry: self.retry,
            notification_title: self.notifications.title.clone(),
        })
    }
}

/// Resolved, validated values shared by the use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Directory local file names are resolved against.
    pub local_folder: PathBuf,
    /// Remote folder uploads are written into.
    pub remote_folder: RemotePath,
    /// Retry budgets.
    pub retry: RetryConfig,
    /// Title for every notification.
    pub notification_title: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
