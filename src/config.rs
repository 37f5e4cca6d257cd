//! Configuration for tagged-console

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::DEFAULT_NAME;

/// Which host a configured console is bound to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Forward to the tracing subscriber
    #[default]
    Tracing,
    /// Print to stdout/stderr
    Stdio,
    /// No host console; every call is dropped
    None,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Tracing => "tracing",
            SinkKind::Stdio => "stdio",
            SinkKind::None => "none",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sink '{0}' (expected tracing, stdio or none)")]
pub struct ParseSinkError(pub String);

impl FromStr for SinkKind {
    type Err = ParseSinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tracing" => Ok(SinkKind::Tracing),
            "stdio" => Ok(SinkKind::Stdio),
            "none" => Ok(SinkKind::None),
            _ => Err(ParseSinkError(s.to_string())),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Label printed ahead of every message (default: "console")
    #[serde(default = "default_name")]
    pub name: String,

    /// Whether the console reports at all
    #[serde(default = "default_active")]
    pub active: bool,

    /// Host the console prints through
    #[serde(default)]
    pub sink: SinkKind,

    /// Default filter directive for diagnostics, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Append diagnostics to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_active() -> bool {
    true
}

fn default_log_filter() -> String {
    "tagged_console=info".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            active: default_active(),
            sink: SinkKind::default(),
            log_filter: default_log_filter(),
            log_file: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.tagged-console)
/// Falls back to ./.tagged-console if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| PathBuf::from(".tagged-console"))
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tagged-console"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
