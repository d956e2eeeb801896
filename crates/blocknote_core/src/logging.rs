//! Rolling file logs for editor sessions.
//!
//! # Responsibility
//! - Start one process-wide file logger from [`LogSettings`], usually taken
//!   from [`EditorConfig`].
//! - Report the active settings so hosts can show where logs go.
//!
//! # Invariants
//! - A second start with equal settings is a no-op; different settings are a
//!   [`LoggingError::Conflict`], and the running logger is kept.
//! - Editor events are metadata-only: IDs, kinds, counts and revisions.
//!   Block text, cell contents and card text never reach the log, and panic
//!   payloads are flattened and capped before they are written.

use crate::config::EditorConfig;
use crate::model::block::BlockKind;
use crate::palette::COMMANDS;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "blocknote";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_MAX_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Validated logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Absolute directory holding `blocknote*.log` files.
    pub dir: PathBuf,
}

impl LogSettings {
    /// Parses raw host input (FFI strings).
    pub fn new(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        let level = parse_level(level)
            .ok_or_else(|| LoggingError::InvalidLevel(level.trim().to_string()))?;
        Ok(Self {
            level,
            dir: absolute_dir(Path::new(log_dir.trim()))?,
        })
    }

    /// Takes level and directory from an editor configuration.
    ///
    /// # Errors
    /// - `MissingDir` when `config.log_dir` is unset.
    /// - `InvalidDir` when it is not absolute.
    pub fn from_config(config: &EditorConfig) -> Result<Self, LoggingError> {
        let dir = config.log_dir.as_deref().ok_or(LoggingError::MissingDir)?;
        Ok(Self {
            level: config.log_level,
            dir: absolute_dir(dir)?,
        })
    }
}

/// Logger setup failure.
#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    MissingDir,
    InvalidDir(String),
    CreateDir { dir: PathBuf, source: std::io::Error },
    Backend(FlexiLoggerError),
    /// A logger with other settings is already running.
    Conflict {
        active: LogSettings,
        requested: LogSettings,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::MissingDir => write!(f, "no log directory configured"),
            Self::InvalidDir(value) => write!(f, "log_dir must be an absolute path, got `{value}`"),
            Self::CreateDir { dir, source } => {
                write!(f, "failed to create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already running ({} at `{}`); refusing to switch to {} at `{}`",
                active.level,
                active.dir.display(),
                requested.level,
                requested.dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts the process-wide file logger.
///
/// # Errors
/// - `CreateDir` / `Backend` when the log directory or backend cannot be set up.
/// - `Conflict` when a logger with other settings is already running.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(settings))?;
    if active.settings != *settings {
        return Err(LoggingError::Conflict {
            active: active.settings.clone(),
            requested: settings.clone(),
        });
    }
    Ok(())
}

/// Starts logging with the level and directory of `config`.
pub fn init_logging_from_config(config: &EditorConfig) -> Result<(), LoggingError> {
    init_logging(&LogSettings::from_config(config)?)
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE_LOGGER.get().map(|active| active.settings.clone())
}

/// `Debug` for debug builds, `Info` for release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Parses `trace|debug|info|warn|error` (case-insensitive, `warning` allowed).
///
/// `off` is rejected: a host that wants no logs skips initialization.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    let lowered = raw.trim().to_ascii_lowercase();
    let name = if lowered == "warning" { "warn" } else { lowered.as_str() };
    LevelFilter::from_str(name)
        .ok()
        .filter(|level| *level != LevelFilter::Off)
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, LoggingError> {
    if dir.as_os_str().is_empty() || !dir.is_absolute() {
        return Err(LoggingError::InvalidDir(dir.display().to_string()));
    }
    Ok(dir.to_path_buf())
}

fn start_logger(settings: &LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::CreateDir {
        dir: settings.dir.clone(),
        source,
    })?;

    let spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    install_panic_logging();
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={} block_kinds={} palette_commands={}",
        settings.level,
        settings.dir.display(),
        env!("CARGO_PKG_VERSION"),
        BlockKind::ALL.len(),
        COMMANDS.len()
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

/// Chains a hook that records panics before the previous hook runs.
///
/// Called once, from the logger start.
fn install_panic_logging() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .map_or_else(|| "non-string panic payload".to_string(), |raw| flatten_payload(&raw));
        error!("event=panic_captured module=logging status=error location={location} payload={payload}");
        previous(info);
    }));
}

/// One line, at most `PANIC_PAYLOAD_MAX_CHARS` chars plus an ellipsis.
fn flatten_payload(raw: &str) -> String {
    let single_line = raw.replace(['\n', '\r'], " ");
    match single_line.char_indices().nth(PANIC_PAYLOAD_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &single_line[..cut]),
        None => single_line,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        flatten_payload, init_logging, init_logging_from_config, logging_status, parse_level,
        LogSettings, LoggingError, PANIC_PAYLOAD_MAX_CHARS,
    };
    use crate::config::EditorConfig;
    use log::LevelFilter;

    #[test]
    fn parse_level_accepts_known_values() {
        assert_eq!(parse_level("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_level(" warning "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level("off"), None);
    }

    #[test]
    fn settings_reject_relative_or_missing_dirs() {
        assert!(matches!(
            LogSettings::new("info", "logs/dev"),
            Err(LoggingError::InvalidDir(_))
        ));
        assert!(matches!(
            LogSettings::new("loud", "/tmp"),
            Err(LoggingError::InvalidLevel(level)) if level == "loud"
        ));
        assert!(matches!(
            LogSettings::from_config(&EditorConfig::default()),
            Err(LoggingError::MissingDir)
        ));
    }

    #[test]
    fn flatten_payload_is_single_line_and_capped() {
        assert_eq!(flatten_payload("a\nb\rc"), "a b c");
        let long = flatten_payload(&"é".repeat(PANIC_PAYLOAD_MAX_CHARS + 5));
        assert_eq!(long.chars().count(), PANIC_PAYLOAD_MAX_CHARS + 3);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn logger_starts_once_and_rejects_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            log_level: LevelFilter::Info,
            log_dir: Some(dir.path().to_path_buf()),
            ..EditorConfig::default()
        };

        init_logging_from_config(&config).unwrap();
        init_logging_from_config(&config).unwrap();
        let active = logging_status().unwrap();
        assert_eq!(active, LogSettings::from_config(&config).unwrap());

        let louder = LogSettings {
            level: LevelFilter::Debug,
            ..active.clone()
        };
        let err = init_logging(&louder).unwrap_err();
        assert!(matches!(err, LoggingError::Conflict { .. }));
        assert!(err.to_string().contains("refusing to switch"));
        assert_eq!(logging_status(), Some(active));
    }
}
