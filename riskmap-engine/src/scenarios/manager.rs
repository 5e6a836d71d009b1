//! ScenarioManager — CRUD over scenarios and their selections.
//!
//! Each scenario runs `nonexistent → created → (updated)* → deleted`;
//! selections exist only while their scenario does. Every
//! multi-statement write runs in one transaction, including the
//! unset-other-defaults step, so a failed write leaves nothing behind.
//! There is no cross-request conflict detection: concurrent saves to
//! the same scenario are last-write-wins by design.
//!
//! Ownership is enforced only when a caller supplies `user_id`;
//! omitting it is the documented weak mode for trusted internal
//! callers.

use std::sync::Arc;

use riskmap_core::errors::ScenarioError;
use riskmap_core::types::{CapabilitySelection, ControlSelection, Scenario};
use riskmap_storage::queries::scenarios::{self, ScenarioWriteOutcome};
use riskmap_storage::queries::selections;
use riskmap_storage::DatabaseManager;
use rusqlite::Connection;

use super::types::{
    validate_capability_selections, validate_control_selections,
    CapabilitySelectionsBulk, ControlSelectionsBulk, NewScenario, ScenarioUpdate,
    ScenarioWithSelections,
};

/// Manages scenario and selection persistence over an injected
/// database handle.
pub struct ScenarioManager {
    db: Arc<DatabaseManager>,
}

impl ScenarioManager {
    /// Create a manager over an opened database.
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// All scenarios for a user, default first, then most recently
    /// updated.
    pub fn list(&self, user_id: i64) -> Result<Vec<Scenario>, ScenarioError> {
        let rows = self
            .db
            .with_reader(|conn| scenarios::list_by_user(conn, user_id))?;
        Ok(rows)
    }

    /// Create a scenario. When `is_default` is set, every other
    /// scenario owned by the user loses its default flag in the same
    /// transaction.
    pub fn create(&self, new: &NewScenario) -> Result<Scenario, ScenarioError> {
        let scenario = self.db.with_writer_txn(|conn| {
            if new.is_default {
                scenarios::unset_defaults(conn, new.user_id)?;
            }
            let scenario_id = match scenarios::insert_scenario(
                conn,
                new.user_id,
                &new.scenario_name,
                new.is_default,
            )? {
                ScenarioWriteOutcome::Ok(id) => id,
                ScenarioWriteOutcome::DuplicateName => {
                    return Err(ScenarioError::DuplicateName {
                        name: new.scenario_name.clone(),
                    });
                }
            };
            fetch_scenario(conn, scenario_id)
        })?;

        tracing::info!(
            scenario_id = scenario.scenario_id,
            user_id = scenario.user_id,
            "created scenario"
        );
        Ok(scenario)
    }

    /// Fetch a scenario with both selection lists.
    ///
    /// All three reads share one pooled connection, so the result is a
    /// point-in-time view even while another caller is deleting or
    /// rewriting the scenario.
    pub fn get(
        &self,
        scenario_id: i64,
        user_id: Option<i64>,
    ) -> Result<ScenarioWithSelections, ScenarioError> {
        let fetched = self.db.with_reader(|conn| {
            match scenarios::get_scenario(conn, scenario_id)? {
                Some(scenario) => {
                    let caps = selections::capability_selections(conn, scenario_id)?;
                    let controls = selections::control_selections(conn, scenario_id)?;
                    Ok(Some((scenario, caps, controls)))
                }
                None => Ok(None),
            }
        })?;
        let (scenario, caps, controls) =
            fetched.ok_or(ScenarioError::NotFound { scenario_id })?;
        check_ownership(&scenario, user_id)?;

        Ok(ScenarioWithSelections {
            scenario,
            selections: caps,
            control_selections: controls,
        })
    }

    /// Partial update. Unsupplied fields keep their current values;
    /// supplied selection lists replace the stored sets wholesale.
    pub fn update(
        &self,
        scenario_id: i64,
        update: &ScenarioUpdate,
        user_id: Option<i64>,
    ) -> Result<Scenario, ScenarioError> {
        if let Some(sel) = &update.selections {
            validate_capability_selections(sel)?;
        }
        if let Some(sel) = &update.control_selections {
            validate_control_selections(sel)?;
        }

        self.db.with_writer_txn(|conn| {
            let current = scenarios::get_scenario(conn, scenario_id)?
                .ok_or(ScenarioError::NotFound { scenario_id })?;
            check_ownership(&current, user_id)?;

            let new_name = update
                .scenario_name
                .clone()
                .unwrap_or(current.scenario_name);
            let new_is_default = update.is_default.unwrap_or(current.is_default);

            if new_is_default {
                scenarios::unset_defaults(conn, current.user_id)?;
            }
            match scenarios::update_scenario(conn, scenario_id, &new_name, new_is_default)?
            {
                ScenarioWriteOutcome::Ok(_) => {}
                ScenarioWriteOutcome::DuplicateName => {
                    return Err(ScenarioError::DuplicateName { name: new_name });
                }
            }

            if let Some(sel) = &update.selections {
                selections::replace_capability_selections(conn, scenario_id, sel)?;
            }
            if let Some(sel) = &update.control_selections {
                selections::replace_control_selections(conn, scenario_id, sel)?;
            }

            fetch_scenario(conn, scenario_id)
        })
    }

    /// Delete a scenario; its selections cascade away with it.
    pub fn delete(
        &self,
        scenario_id: i64,
        user_id: Option<i64>,
    ) -> Result<(), ScenarioError> {
        self.db.with_writer_txn(|conn| {
            let owner = scenarios::get_owner(conn, scenario_id)?
                .ok_or(ScenarioError::NotFound { scenario_id })?;
            check_owner_id(scenario_id, owner, user_id)?;
            scenarios::delete_scenario(conn, scenario_id)?;
            Ok::<_, ScenarioError>(())
        })?;

        tracing::info!(scenario_id, "deleted scenario");
        Ok(())
    }

    /// Replace every capability selection for a scenario. Returns the
    /// number of rows saved.
    pub fn save_capability_selections(
        &self,
        bulk: &CapabilitySelectionsBulk,
    ) -> Result<usize, ScenarioError> {
        validate_capability_selections(&bulk.selections)?;

        let count = self.db.with_writer_txn(|conn| {
            let owner = scenarios::get_owner(conn, bulk.scenario_id)?
                .ok_or(ScenarioError::NotFound {
                    scenario_id: bulk.scenario_id,
                })?;
            check_owner_id(bulk.scenario_id, owner, bulk.user_id)?;

            let count = selections::replace_capability_selections(
                conn,
                bulk.scenario_id,
                &bulk.selections,
            )?;
            scenarios::touch_updated_at(conn, bulk.scenario_id)?;
            Ok::<_, ScenarioError>(count)
        })?;

        tracing::debug!(
            scenario_id = bulk.scenario_id,
            count,
            "saved capability selections"
        );
        Ok(count)
    }

    /// All capability selections for a scenario.
    pub fn capability_selections(
        &self,
        scenario_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<CapabilitySelection>, ScenarioError> {
        let fetched = self.db.with_reader(|conn| {
            match scenarios::get_owner(conn, scenario_id)? {
                Some(owner) => {
                    let rows = selections::capability_selections(conn, scenario_id)?;
                    Ok(Some((owner, rows)))
                }
                None => Ok(None),
            }
        })?;
        let (owner, rows) = fetched.ok_or(ScenarioError::NotFound { scenario_id })?;
        check_owner_id(scenario_id, owner, user_id)?;
        Ok(rows)
    }

    /// Replace every control selection for a scenario. Returns the
    /// number of rows saved.
    pub fn save_control_selections(
        &self,
        bulk: &ControlSelectionsBulk,
    ) -> Result<usize, ScenarioError> {
        validate_control_selections(&bulk.selections)?;

        let count = self.db.with_writer_txn(|conn| {
            let owner = scenarios::get_owner(conn, bulk.scenario_id)?
                .ok_or(ScenarioError::NotFound {
                    scenario_id: bulk.scenario_id,
                })?;
            check_owner_id(bulk.scenario_id, owner, bulk.user_id)?;

            let count = selections::replace_control_selections(
                conn,
                bulk.scenario_id,
                &bulk.selections,
            )?;
            scenarios::touch_updated_at(conn, bulk.scenario_id)?;
            Ok::<_, ScenarioError>(count)
        })?;

        tracing::debug!(
            scenario_id = bulk.scenario_id,
            count,
            "saved control selections"
        );
        Ok(count)
    }

    /// All control selections for a scenario.
    pub fn control_selections(
        &self,
        scenario_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<ControlSelection>, ScenarioError> {
        let fetched = self.db.with_reader(|conn| {
            match scenarios::get_owner(conn, scenario_id)? {
                Some(owner) => {
                    let rows = selections::control_selections(conn, scenario_id)?;
                    Ok(Some((owner, rows)))
                }
                None => Ok(None),
            }
        })?;
        let (owner, rows) = fetched.ok_or(ScenarioError::NotFound { scenario_id })?;
        check_owner_id(scenario_id, owner, user_id)?;
        Ok(rows)
    }
}

fn check_ownership(scenario: &Scenario, user_id: Option<i64>) -> Result<(), ScenarioError> {
    check_owner_id(scenario.scenario_id, scenario.user_id, user_id)
}

fn check_owner_id(
    scenario_id: i64,
    owner: i64,
    user_id: Option<i64>,
) -> Result<(), ScenarioError> {
    match user_id {
        Some(uid) if uid != owner => Err(ScenarioError::Forbidden {
            scenario_id,
            user_id: uid,
        }),
        _ => Ok(()),
    }
}

/// Re-read a scenario inside the transaction that just wrote it.
fn fetch_scenario(conn: &Connection, scenario_id: i64) -> Result<Scenario, ScenarioError> {
    scenarios::get_scenario(conn, scenario_id)?
        .ok_or(ScenarioError::NotFound { scenario_id })
}
