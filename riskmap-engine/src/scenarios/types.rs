//! Scenario CRUD contract types.
//!
//! Strongly typed selection payloads: rows are validated here before
//! they reach the manager, so a malformed record surfaces as a
//! `Validation` error instead of a storage failure mid-write.

use riskmap_core::errors::ScenarioError;
use riskmap_core::types::{CapabilitySelection, ControlSelection, Scenario};
use serde::{Deserialize, Serialize};

/// Request to create a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScenario {
    pub user_id: i64,
    pub scenario_name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update: only supplied fields change. Supplying
/// `selections` or `control_selections` replaces the entire set for
/// the scenario; omitting a field leaves existing rows untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioUpdate {
    pub scenario_name: Option<String>,
    pub is_default: Option<bool>,
    pub selections: Option<Vec<CapabilitySelection>>,
    pub control_selections: Option<Vec<ControlSelection>>,
}

/// A scenario with both of its selection lists, as returned by `get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioWithSelections {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub selections: Vec<CapabilitySelection>,
    pub control_selections: Vec<ControlSelection>,
}

/// Bulk capability-selection save. `user_id` is optional: when absent,
/// ownership is not checked (trusted/internal callers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitySelectionsBulk {
    pub scenario_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub selections: Vec<CapabilitySelection>,
}

/// Bulk control-selection save, same shape as the capability variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSelectionsBulk {
    pub scenario_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub selections: Vec<ControlSelection>,
}

/// Reject capability selections with an empty id.
pub(crate) fn validate_capability_selections(
    selections: &[CapabilitySelection],
) -> Result<(), ScenarioError> {
    for (index, s) in selections.iter().enumerate() {
        if s.capability_id.is_empty() {
            return Err(ScenarioError::Validation {
                index,
                field: "capability_id",
            });
        }
    }
    Ok(())
}

/// Reject control selections with an empty id.
pub(crate) fn validate_control_selections(
    selections: &[ControlSelection],
) -> Result<(), ScenarioError> {
    for (index, s) in selections.iter().enumerate() {
        if s.control_id.is_empty() {
            return Err(ScenarioError::Validation {
                index,
                field: "control_id",
            });
        }
    }
    Ok(())
}
