//!
//! Configuration of the reference backend and environment awareness.
//!

use std::path::PathBuf;

pub use ::config::ConfigError;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::logger::types::Severity;

/// Env variable that selects the Development/Sandbox/Production config file.
pub const RUN_ENV: &str = "RUN_ENV";

/// Current environment.
#[derive(Debug, Default, Deserialize, Clone, Copy, Display, EnumString)]
pub enum Env {
    /// Development environment.
    #[default]
    Development,
    /// Sandbox environment.
    Sandbox,
    /// Production environment.
    Production,
}

/// Name of the current environment, taken from `RUN_ENV`. Defaults to
/// `Development` for debug builds and `Production` otherwise.
pub fn which() -> Env {
    #[cfg(debug_assertions)]
    let default_env = Env::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Env::Production;

    std::env::var(RUN_ENV).map_or_else(|_| default_env, |v| v.parse().unwrap_or(default_env))
}

/// Base path the `config/` directory is resolved against.
///
/// Running from the workspace root and from a crate directory must both find
/// the same files, so the path is derived from the crate manifest location
/// rather than the current working directory.
pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Logging configuration.
    pub log: Log,
}

/// Logging configuration: one section per output destination.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Log {
    /// JSON lines to stdout.
    pub console: LogConsole,
    /// JSON lines to an hourly-rolled file.
    pub file: LogFile,
}

/// Console output settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConsole {
    /// Whether the console output is enabled.
    pub enabled: bool,
    /// Minimum severity emitted to the console.
    pub level: Severity,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Severity::Info,
        }
    }
}

/// File output settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogFile {
    /// Whether the file output is enabled.
    pub enabled: bool,
    /// Minimum severity emitted to the file.
    pub level: Severity,
    /// Directory the log files are written to, relative to
    /// [`workspace_path`].
    pub path: String,
    /// Base name of the log file; the roller appends the hour suffix.
    pub file_name: String,
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Severity::Debug,
            path: "logs".to_owned(),
            file_name: "log_bridge.log".to_owned(),
        }
    }
}

impl Config {
    /// Load configuration for the current environment.
    ///
    /// Reads `config/{RUN_ENV}.toml` below [`workspace_path`] when present,
    /// then applies `LOG_BRIDGE__`-prefixed environment variables on top.
    pub fn new() -> Result<Self, ConfigError> {
        let environment = which();
        let mut config_path = workspace_path();
        config_path.push("config");
        config_path.push(format!("{environment}.toml"));

        Self::new_with_config_path(config_path)
    }

    /// Load configuration from an explicit file path, environment override
    /// included. A missing file falls back to defaults.
    pub fn new_with_config_path(path: PathBuf) -> Result<Self, ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("LOG_BRIDGE")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
