//! Domain records.
//!
//! Catalog records (risks, controls, capabilities) are read-only here:
//! the ETL collaborator owns and repopulates them. Scenario and
//! selection records are owned by this core.

use serde::{Deserialize, Serialize};

/// A risk from the catalog. Covered only when every required control
/// is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub risk_id: String,
    pub risk_title: Option<String>,
    pub risk_description: Option<String>,
}

/// A control from the catalog — the atomic unit of coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub control_id: String,
    pub control_title: Option<String>,
    pub control_description: Option<String>,
    pub security_function: Option<String>,
}

/// A capability: a named grouping of controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub capability_id: String,
    pub capability_name: String,
    pub capability_type: Option<String>,
    pub capability_domain: Option<String>,
    pub capability_definition: Option<String>,
}

/// A saved, user-owned what-if scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: i64,
    pub user_id: i64,
    pub scenario_name: String,
    pub is_default: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One capability toggle within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySelection {
    pub capability_id: String,
    pub is_active: bool,
}

/// One control toggle within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSelection {
    pub control_id: String,
    pub is_active: bool,
}
