//! Schema migration registry and executor.
//!
//! # Responsibility
//! - Hold the ordered list of schema migrations this build knows.
//! - Bring opened connections up to the newest version in one transaction.
//!
//! # Invariants
//! - Migration versions increase strictly; the list is append-only.
//! - `PRAGMA user_version` always matches the last applied migration.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_storage_items.sql"),
}];

/// Returns the newest schema version this build ships.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|step| step.version).unwrap_or(0)
}

/// Brings `conn` up to the newest schema, one migration per step.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let installed = installed_version(conn)?;
    let target = latest_version();

    if installed > target {
        return Err(DbError::UnsupportedSchemaVersion {
            found: installed,
            supported: target,
        });
    }
    if installed == target {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in MIGRATIONS.iter().filter(|step| step.version > installed) {
        tx.execute_batch(step.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
        info!("event=db_migrate module=db status=ok version={}", step.version);
    }
    tx.commit()?;

    Ok(())
}

fn installed_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
