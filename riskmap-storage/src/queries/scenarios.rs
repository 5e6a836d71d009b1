//! capability_scenarios table queries.

use riskmap_core::errors::StorageError;
use riskmap_core::types::Scenario;
use rusqlite::{params, Connection, OptionalExtension};

use crate::connection::sqlite_err;

/// Outcome of a scenario write that can collide with the
/// `UNIQUE(user_id, scenario_name)` constraint. The caller decides how
/// to surface the duplicate (the manager maps it to `DuplicateName`).
#[derive(Debug)]
pub enum ScenarioWriteOutcome {
    /// The write succeeded; carries the scenario id.
    Ok(i64),
    /// The (user_id, scenario_name) pair already exists.
    DuplicateName,
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(f, Some(msg)) => {
            f.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains("UNIQUE constraint failed: capability_scenarios")
        }
        _ => false,
    }
}

/// Insert a scenario row. Duplicate (user_id, scenario_name) pairs are
/// reported via the outcome, not an error.
pub fn insert_scenario(
    conn: &Connection,
    user_id: i64,
    scenario_name: &str,
    is_default: bool,
) -> Result<ScenarioWriteOutcome, StorageError> {
    let result = conn.execute(
        "INSERT INTO capability_scenarios (user_id, scenario_name, is_default)
         VALUES (?1, ?2, ?3)",
        params![user_id, scenario_name, is_default as i32],
    );
    match result {
        Ok(_) => Ok(ScenarioWriteOutcome::Ok(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(ScenarioWriteOutcome::DuplicateName),
        Err(e) => Err(sqlite_err(e)),
    }
}

/// Update a scenario's name and default flag, touching `updated_at`.
pub fn update_scenario(
    conn: &Connection,
    scenario_id: i64,
    scenario_name: &str,
    is_default: bool,
) -> Result<ScenarioWriteOutcome, StorageError> {
    let result = conn.execute(
        "UPDATE capability_scenarios
         SET scenario_name = ?1, is_default = ?2, updated_at = unixepoch()
         WHERE scenario_id = ?3",
        params![scenario_name, is_default as i32, scenario_id],
    );
    match result {
        Ok(_) => Ok(ScenarioWriteOutcome::Ok(scenario_id)),
        Err(e) if is_unique_violation(&e) => Ok(ScenarioWriteOutcome::DuplicateName),
        Err(e) => Err(sqlite_err(e)),
    }
}

/// Clear the default flag on every scenario owned by the user.
/// Run in the same transaction as the write that sets a new default.
pub fn unset_defaults(conn: &Connection, user_id: i64) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE capability_scenarios SET is_default = 0 WHERE user_id = ?1",
        params![user_id],
    )
    .map_err(sqlite_err)
}

/// Fetch one scenario by id.
pub fn get_scenario(
    conn: &Connection,
    scenario_id: i64,
) -> Result<Option<Scenario>, StorageError> {
    conn.query_row(
        "SELECT scenario_id, user_id, scenario_name, is_default, created_at, updated_at
         FROM capability_scenarios WHERE scenario_id = ?1",
        params![scenario_id],
        map_row,
    )
    .optional()
    .map_err(sqlite_err)
}

/// Owner of a scenario, or None if the scenario does not exist.
pub fn get_owner(conn: &Connection, scenario_id: i64) -> Result<Option<i64>, StorageError> {
    conn.query_row(
        "SELECT user_id FROM capability_scenarios WHERE scenario_id = ?1",
        params![scenario_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(sqlite_err)
}

/// All scenarios for a user, default first, then most recently updated.
pub fn list_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Scenario>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT scenario_id, user_id, scenario_name, is_default, created_at, updated_at
             FROM capability_scenarios
             WHERE user_id = ?1
             ORDER BY is_default DESC, updated_at DESC",
        )
        .map_err(sqlite_err)?;
    let rows = stmt.query_map(params![user_id], map_row).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Touch the scenario's `updated_at` timestamp.
pub fn touch_updated_at(conn: &Connection, scenario_id: i64) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE capability_scenarios SET updated_at = unixepoch() WHERE scenario_id = ?1",
        params![scenario_id],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Delete a scenario. Selections cascade. Returns rows removed.
pub fn delete_scenario(conn: &Connection, scenario_id: i64) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM capability_scenarios WHERE scenario_id = ?1",
        params![scenario_id],
    )
    .map_err(sqlite_err)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Scenario> {
    Ok(Scenario {
        scenario_id: row.get(0)?,
        user_id: row.get(1)?,
        scenario_name: row.get(2)?,
        is_default: row.get::<_, i32>(3)? != 0,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
