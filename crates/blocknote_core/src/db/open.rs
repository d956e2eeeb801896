//! Connection bootstrap for the document store.
//!
//! File stores run in WAL journal mode with a 5 s busy timeout.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, StoreLocation};
use crate::config::EditorConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) a document store file.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_store(&StoreLocation::File(path.as_ref().to_path_buf()))
}

pub fn open_db_in_memory() -> DbResult<Connection> {
    open_store(&StoreLocation::Memory)
}

/// Opens the store named by `config.db_path`, in memory when unset.
pub fn open_db_with_config(config: &EditorConfig) -> DbResult<Connection> {
    open_store(&StoreLocation::from_config(config))
}

/// Opens `location` and applies pending migrations.
///
/// # Side effects
/// - Emits one `db_open` event with status and duration.
pub fn open_store(location: &StoreLocation) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect(location).and_then(|mut conn| {
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={duration_ms}",
            location.mode()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={duration_ms} error={err}",
            location.mode()
        ),
    }
    result
}

fn connect(location: &StoreLocation) -> DbResult<Connection> {
    let opened = match location {
        StoreLocation::File(path) => Connection::open(path).and_then(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            Ok(conn)
        }),
        StoreLocation::Memory => Connection::open_in_memory(),
    };
    let conn = opened
        .and_then(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(conn)
        })
        .map_err(|source| DbError::Open {
            location: location.clone(),
            source,
        })?;
    Ok(conn)
}
