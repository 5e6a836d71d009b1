//! Analysis request/response contract.
//!
//! Field names are the stable frontend contract — renaming any of
//! them breaks the dashboard.

use serde::{Deserialize, Serialize};

/// An analysis request from the API boundary.
///
/// `control_ids` is a control-level override: absent means "every
/// control from the active capabilities is active"; present (even
/// empty) narrows the active set to the intersection, which can
/// legitimately yield zero active controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub capability_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_ids: Option<Vec<String>>,
}

/// One active control, with the capabilities that contributed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveControlEntry {
    pub control_id: String,
    pub control_description: Option<String>,
    pub capability_names: Vec<String>,
}

/// A risk with some but not all required controls active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartiallyCoveredRiskEntry {
    pub risk_id: String,
    pub risk_title: String,
    pub risk_description: String,
    pub active_controls: Vec<String>,
    pub inactive_controls: Vec<String>,
    pub total_controls_required: i64,
}

/// A risk with no required controls active. `required_controls` is
/// empty for a risk with no control mappings at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposedRiskEntry {
    pub risk_id: String,
    pub risk_title: String,
    pub risk_description: String,
    pub required_controls: Vec<String>,
}

/// The coverage report consumed by the dashboard.
///
/// Invariant: `active_risks + partially_covered_risks + exposed_risks
/// == total_risks`. Detail list ordering is unspecified; consumers
/// must not rely on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total_controls: i64,
    pub controls_in_capabilities: i64,
    pub active_controls: i64,
    pub total_risks: i64,
    pub active_risks: i64,
    pub partially_covered_risks: i64,
    pub exposed_risks: i64,
    pub active_controls_list: Vec<ActiveControlEntry>,
    pub partially_covered_risks_list: Vec<PartiallyCoveredRiskEntry>,
    pub exposed_risks_list: Vec<ExposedRiskEntry>,
}
