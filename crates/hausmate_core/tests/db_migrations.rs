use hausmate_core::db::migrations::latest_version;
use hausmate_core::db::{open_db, open_db_in_memory, DbError};
use hausmate_core::{SqliteStorage, StorageMedium};
use rusqlite::Connection;

#[test]
fn fresh_connection_comes_out_fully_migrated() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let columns = table_columns(&conn, "storage_items");
    for expected in ["key", "value", "updated_at"] {
        assert!(
            columns.iter().any(|column| column == expected),
            "storage_items is missing column {expected}, has {columns:?}"
        );
    }
}

#[test]
fn reopening_a_database_file_keeps_schema_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hausmate.db");

    {
        let conn = open_db(&path).unwrap();
        let mut storage = SqliteStorage::try_new(&conn).unwrap();
        storage.set_item("expenses", r#"[{"seed":true}]"#).unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());

    let storage = SqliteStorage::try_new(&conn).unwrap();
    assert_eq!(
        storage.get_item("expenses").unwrap().as_deref(),
        Some(r#"[{"seed":true}]"#)
    );
}

#[test]
fn database_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 40;").unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { found: 40, .. }
    ));
    assert!(err.to_string().contains("newer"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    columns
}
