//! Connection and migration tests.

use riskmap_core::errors::StorageError;
use riskmap_storage::connection::pragmas::{apply_pragmas, verify_wal_mode};
use riskmap_storage::{migrations, DatabaseManager};
use rusqlite::Connection;

#[test]
fn migrations_apply_to_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(migrations::current_version(&conn).unwrap(), 2);
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(migrations::current_version(&conn).unwrap(), 2);
}

#[test]
fn all_tables_exist_after_migration() {
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();

    for table in [
        "risks",
        "controls",
        "capabilities",
        "capability_control_mapping",
        "risk_control_mapping",
        "capability_scenarios",
        "capability_selections",
        "control_selections",
    ] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}

#[test]
fn on_disk_database_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("riskmap.db");
    let db = DatabaseManager::open(&path).unwrap();
    db.with_writer(|conn| verify_wal_mode(conn).map(|wal| assert!(wal)))
        .unwrap();
    assert_eq!(db.path(), Some(path.as_path()));
}

#[test]
fn reopening_preserves_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("riskmap.db");

    {
        let db = DatabaseManager::open(&path).unwrap();
        db.with_writer(|conn| {
            conn.execute(
                "INSERT INTO risks (risk_id, risk_title) VALUES ('R1', 'Test risk')",
                [],
            )
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
            Ok(())
        })
        .unwrap();
    }

    let db = DatabaseManager::open(&path).unwrap();
    let count: i64 = db
        .with_reader(|conn| {
            conn.query_row("SELECT COUNT(*) FROM risks", [], |row| row.get(0))
                .map_err(|e| StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn writer_txn_rolls_back_on_error() {
    let db = DatabaseManager::open_in_memory().unwrap();

    let result: Result<(), StorageError> = db.with_writer_txn(|conn| {
        conn.execute(
            "INSERT INTO capability_scenarios (user_id, scenario_name) VALUES (1, 'doomed')",
            [],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        Err(StorageError::SqliteError {
            message: "forced failure".to_string(),
        })
    });
    assert!(result.is_err());

    let count: i64 = db
        .with_reader(|conn| {
            conn.query_row("SELECT COUNT(*) FROM capability_scenarios", [], |row| {
                row.get(0)
            })
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })
        })
        .unwrap();
    assert_eq!(count, 0, "rolled-back insert must not persist");
}

#[test]
fn writer_txn_commits_on_ok() {
    let db = DatabaseManager::open_in_memory().unwrap();

    db.with_writer_txn(|conn| {
        conn.execute(
            "INSERT INTO capability_scenarios (user_id, scenario_name) VALUES (1, 'kept')",
            [],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        Ok::<_, StorageError>(())
    })
    .unwrap();

    let count: i64 = db
        .with_reader(|conn| {
            conn.query_row("SELECT COUNT(*) FROM capability_scenarios", [], |row| {
                row.get(0)
            })
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })
        })
        .unwrap();
    assert_eq!(count, 1);
}
