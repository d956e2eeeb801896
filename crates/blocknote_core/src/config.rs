//! Editor configuration.
//!
//! # Responsibility
//! - Hold process-level options for editor sessions, logging and storage.
//! - Read overrides from `BLOCKNOTE_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Invalid values are rejected, never silently coerced.

use crate::logging::{default_log_level, parse_level};
use log::LevelFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_READ_ONLY: &str = "BLOCKNOTE_READ_ONLY";
pub const ENV_LOG_LEVEL: &str = "BLOCKNOTE_LOG_LEVEL";
pub const ENV_DB_PATH: &str = "BLOCKNOTE_DB_PATH";
pub const ENV_LOG_DIR: &str = "BLOCKNOTE_LOG_DIR";

/// Options shared by editor sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// View-only mode: mutations are ignored and the palette never opens.
    pub read_only: bool,
    pub log_level: LevelFilter,
    /// Directory for rolling log files; `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
    /// Document database location; `None` means caller decides.
    pub db_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            log_level: default_log_level(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl EditorConfig {
    /// View-only configuration with remaining defaults.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Builds configuration from process environment.
    ///
    /// # Errors
    /// - `InvalidBool` when `BLOCKNOTE_READ_ONLY` is not a boolean word.
    /// - `InvalidLogLevel` when `BLOCKNOTE_LOG_LEVEL` is unsupported.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(ENV_READ_ONLY)) {
            config.read_only = parse_bool(&raw).ok_or(ConfigError::InvalidBool {
                key: ENV_READ_ONLY,
                value: raw,
            })?;
        }

        if let Some(raw) = non_blank(lookup(ENV_LOG_LEVEL)) {
            config.log_level = parse_level(&raw).ok_or(ConfigError::InvalidLogLevel(raw))?;
        }

        config.log_dir = non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from);

        config.db_path = Self::db_path_from_lookup(&lookup);
        Ok(config)
    }

    /// Reads only the document database location.
    ///
    /// Independent of the other variables: an invalid `BLOCKNOTE_READ_ONLY`
    /// or `BLOCKNOTE_LOG_LEVEL` does not hide the path.
    pub fn db_path_from_env() -> Option<PathBuf> {
        Self::db_path_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn db_path_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        non_blank(lookup(ENV_DB_PATH)).map(PathBuf::from)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "{key} must be a boolean, got `{value}`")
            }
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}
