//! Read-only queries over the ETL-populated catalog tables.
//!
//! Unknown ids resolve to empty results, never errors — the coverage
//! report must degrade to zeros rather than fail the dashboard.

use riskmap_core::errors::StorageError;
use riskmap_core::traits::{ControlDetail, RiskDisplay};
use riskmap_core::types::collections::IdSet;
use rusqlite::{params, Connection, OptionalExtension};

use crate::connection::sqlite_err;

/// Count total controls in the catalog.
pub fn count_controls(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM controls", [], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Count total risks in the catalog.
pub fn count_risks(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM risks", [], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Ids of every risk in the catalog.
pub fn all_risk_ids(conn: &Connection) -> Result<IdSet, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT risk_id FROM risks")
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], |row| row.get(0)).map_err(sqlite_err)?;
    rows.collect::<Result<IdSet, _>>().map_err(sqlite_err)
}

/// Distinct controls mapped to any capability at all.
pub fn controls_in_any_capability(conn: &Connection) -> Result<IdSet, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT DISTINCT control_id FROM capability_control_mapping")
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], |row| row.get(0)).map_err(sqlite_err)?;
    rows.collect::<Result<IdSet, _>>().map_err(sqlite_err)
}

/// Distinct controls mapped to any of the given capabilities.
pub fn controls_for_capabilities(
    conn: &Connection,
    capability_ids: &IdSet,
) -> Result<IdSet, StorageError> {
    if capability_ids.is_empty() {
        return Ok(IdSet::default());
    }

    let placeholders = vec!["?"; capability_ids.len()].join(",");
    let sql = format!(
        "SELECT DISTINCT control_id FROM capability_control_mapping
         WHERE capability_id IN ({placeholders})"
    );
    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(capability_ids.iter()), |row| {
            row.get(0)
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<IdSet, _>>().map_err(sqlite_err)
}

/// Controls required to mitigate the given risk.
pub fn required_controls_for_risk(
    conn: &Connection,
    risk_id: &str,
) -> Result<IdSet, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT control_id FROM risk_control_mapping WHERE risk_id = ?1")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![risk_id], |row| row.get(0))
        .map_err(sqlite_err)?;
    rows.collect::<Result<IdSet, _>>().map_err(sqlite_err)
}

/// Display fields for a risk; None for an unknown id.
pub fn risk_display(
    conn: &Connection,
    risk_id: &str,
) -> Result<Option<RiskDisplay>, StorageError> {
    conn.query_row(
        "SELECT risk_title, risk_description FROM risks WHERE risk_id = ?1",
        params![risk_id],
        |row| {
            Ok(RiskDisplay {
                risk_title: row.get(0)?,
                risk_description: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(sqlite_err)
}

/// Display fields for the given controls, each with the names of the
/// capabilities that contributed it. Unknown ids are omitted.
pub fn control_details(
    conn: &Connection,
    control_ids: &IdSet,
) -> Result<Vec<ControlDetail>, StorageError> {
    if control_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; control_ids.len()].join(",");
    let sql = format!(
        "SELECT c.control_id, c.control_description, cap.capability_name
         FROM controls c
         JOIN capability_control_mapping ccm ON c.control_id = ccm.control_id
         JOIN capabilities cap ON ccm.capability_id = cap.capability_id
         WHERE c.control_id IN ({placeholders})
         ORDER BY c.control_id"
    );
    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(control_ids.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(sqlite_err)?;

    // Aggregate per control in Rust so capability names survive intact
    // whatever characters they contain. Rows arrive grouped by id.
    let mut details: Vec<ControlDetail> = Vec::new();
    for row in rows {
        let (control_id, control_description, capability_name) =
            row.map_err(sqlite_err)?;
        match details.last_mut() {
            Some(d) if d.control_id == control_id => {
                if !d.capability_names.contains(&capability_name) {
                    d.capability_names.push(capability_name);
                }
            }
            _ => details.push(ControlDetail {
                control_id,
                control_description,
                capability_names: vec![capability_name],
            }),
        }
    }
    Ok(details)
}
