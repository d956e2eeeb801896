//! SQLite storage for saved block documents.
//!
//! # Responsibility
//! - Resolve where the document store lives ([`StoreLocation`]).
//! - Open connections and bring the `documents` schema up to date.
//!
//! # Invariants
//! - A connection is handed out only after every migration succeeded.
//! - The schema version lives in `PRAGMA user_version`; a store written by a
//!   newer build is refused, never downgraded.

use crate::config::EditorConfig;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_with_config, open_store};

pub type DbResult<T> = Result<T, DbError>;

/// Backing storage of the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Scratch store that disappears with its connection.
    Memory,
}

impl StoreLocation {
    /// `config.db_path`, or an in-memory store when unset.
    pub fn from_config(config: &EditorConfig) -> Self {
        config
            .db_path
            .clone()
            .map_or(Self::Memory, Self::File)
    }

    /// Short tag used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "`{}`", path.display()),
            Self::Memory => write!(f, "in-memory store"),
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// The store could not be opened or configured.
    Open {
        location: StoreLocation,
        source: rusqlite::Error,
    },
    /// A schema migration failed; nothing of it was committed.
    Migration { version: u32, source: rusqlite::Error },
    /// The store was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => write!(f, "cannot open {location}: {source}"),
            Self::Migration { version, source } => {
                write!(f, "schema migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "document store schema {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } | Self::Sqlite(source) => {
                Some(source)
            }
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreLocation;
    use crate::config::EditorConfig;
    use std::path::PathBuf;

    #[test]
    fn location_follows_config() {
        assert_eq!(StoreLocation::from_config(&EditorConfig::default()), StoreLocation::Memory);

        let config = EditorConfig {
            db_path: Some(PathBuf::from("/data/docs.sqlite3")),
            ..EditorConfig::default()
        };
        let location = StoreLocation::from_config(&config);
        assert_eq!(location.mode(), "file");
        assert_eq!(location.to_string(), "`/data/docs.sqlite3`");
    }
}
