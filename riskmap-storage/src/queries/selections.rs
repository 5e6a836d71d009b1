//! capability_selections and control_selections table queries.
//!
//! Writes are replace-all: delete every row for the scenario, then
//! insert the new set. There is no field-level merge. Callers wrap
//! these in a transaction so the swap is all-or-nothing.

use riskmap_core::errors::StorageError;
use riskmap_core::types::{CapabilitySelection, ControlSelection};
use rusqlite::{params, Connection};

use crate::connection::sqlite_err;

/// Replace all capability selections for a scenario. Returns the
/// number of rows inserted.
pub fn replace_capability_selections(
    conn: &Connection,
    scenario_id: i64,
    selections: &[CapabilitySelection],
) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM capability_selections WHERE scenario_id = ?1",
        params![scenario_id],
    )
    .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO capability_selections (scenario_id, capability_id, is_active)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(sqlite_err)?;

    let mut count = 0;
    for s in selections {
        stmt.execute(params![scenario_id, s.capability_id, s.is_active as i32])
            .map_err(sqlite_err)?;
        count += 1;
    }
    Ok(count)
}

/// All capability selections for a scenario.
pub fn capability_selections(
    conn: &Connection,
    scenario_id: i64,
) -> Result<Vec<CapabilitySelection>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT capability_id, is_active FROM capability_selections
             WHERE scenario_id = ?1",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![scenario_id], |row| {
            Ok(CapabilitySelection {
                capability_id: row.get(0)?,
                is_active: row.get::<_, i32>(1)? != 0,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Replace all control selections for a scenario. Returns the number
/// of rows inserted.
pub fn replace_control_selections(
    conn: &Connection,
    scenario_id: i64,
    selections: &[ControlSelection],
) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM control_selections WHERE scenario_id = ?1",
        params![scenario_id],
    )
    .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO control_selections (scenario_id, control_id, is_active)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(sqlite_err)?;

    let mut count = 0;
    for s in selections {
        stmt.execute(params![scenario_id, s.control_id, s.is_active as i32])
            .map_err(sqlite_err)?;
        count += 1;
    }
    Ok(count)
}

/// All control selections for a scenario.
pub fn control_selections(
    conn: &Connection,
    scenario_id: i64,
) -> Result<Vec<ControlSelection>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT control_id, is_active FROM control_selections
             WHERE scenario_id = ?1",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![scenario_id], |row| {
            Ok(ControlSelection {
                control_id: row.get(0)?,
                is_active: row.get::<_, i32>(1)? != 0,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
