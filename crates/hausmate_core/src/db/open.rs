//! Connection open helpers.
//!
//! # Responsibility
//! - Open the household data file, or an in-memory stand-in for tests.
//! - Set the pragmas the storage layer relies on.
//! - Run migrations before handing the connection out.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a 5s busy timeout.
//! - Returned connections are at the latest schema version.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the household database file and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with mode, duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a fresh in-memory database, fully migrated. Test entry point.
///
/// # Side effects
/// - Emits `db_open` logging events with mode, duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => return Err(log_open_failure(mode, "db_open_failed", err.into(), started_at)),
    };

    if let Err(err) = prepare_connection(&mut conn) {
        return Err(log_open_failure(
            mode,
            "db_bootstrap_failed",
            err,
            started_at,
        ));
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn log_open_failure(mode: &str, code: &str, err: DbError, started_at: Instant) -> DbError {
    error!(
        "event=db_open module=db status=error mode={mode} duration_ms={} error_code={code} error={err}",
        started_at.elapsed().as_millis()
    );
    err
}

fn prepare_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    apply_migrations(conn)
}
