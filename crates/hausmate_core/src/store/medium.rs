//! Storage medium contract and its two implementations.
//!
//! # Responsibility
//! - Define the string key-value surface collections are persisted on.
//! - Ship an in-memory medium for tests and a SQLite medium for devices.
//!
//! # Invariants
//! - `get_item` on an unknown key is `Ok(None)`, never an error.
//! - [`SqliteStorage`] refuses to wrap a connection whose schema is not
//!   ready; readiness problems surface as specific error variants.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use rusqlite::Connection;

use crate::db::migrations;

/// Table holding one row per storage key.
const STORAGE_TABLE: &str = "storage_items";

pub type MediumResult<T> = Result<T, MediumError>;

/// Failures a storage medium can raise.
#[derive(Debug)]
pub enum MediumError {
    Sqlite(rusqlite::Error),
    /// The connection's schema version does not match this binary.
    SchemaNotMigrated { expected: u32, found: u32 },
    MissingTable(&'static str),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for MediumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaNotMigrated { expected, found } => write!(
                f,
                "storage schema is at version {found}, expected {expected}; run migrations first"
            ),
            Self::MissingTable(table) => {
                write!(f, "storage table `{table}` is missing")
            }
            Self::MissingColumn { table, column } => {
                write!(f, "storage column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for MediumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for MediumError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

/// String key-value surface the adapter reads and writes.
pub trait StorageMedium {
    /// Returns the blob stored under `key`, if any.
    fn get_item(&self, key: &str) -> MediumResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn set_item(&mut self, key: &str, value: &str) -> MediumResult<()>;
}

/// Infallible in-memory medium.
///
/// `Clone` shares the underlying map, so every store hydrated from
/// clones of one `MemoryStorage` sees the same data. Test code uses a
/// retained clone to inspect what a store persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryStorage {
    fn get_item(&self, key: &str) -> MediumResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> MediumResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed medium over the `storage_items` table.
#[derive(Clone, Copy)]
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> MediumResult<Self> {
        check_schema(conn)?;
        Ok(Self { conn })
    }
}

impl StorageMedium for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> MediumResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM storage_items WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn set_item(&mut self, key: &str, value: &str) -> MediumResult<()> {
        self.conn.execute(
            "INSERT INTO storage_items (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            [key, value],
        )?;
        Ok(())
    }
}

fn check_schema(conn: &Connection) -> MediumResult<()> {
    let expected = migrations::latest_version();
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found != expected {
        return Err(MediumError::SchemaNotMigrated { expected, found });
    }

    if !table_exists(conn, STORAGE_TABLE)? {
        return Err(MediumError::MissingTable(STORAGE_TABLE));
    }
    for column in ["key", "value"] {
        if !column_exists(conn, STORAGE_TABLE, column)? {
            return Err(MediumError::MissingColumn {
                table: STORAGE_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> MediumResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;")?;
    Ok(stmt.exists([table])?)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> MediumResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        if row.get::<_, String>(1)? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
