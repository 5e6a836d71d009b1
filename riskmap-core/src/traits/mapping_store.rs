//! MappingStore trait — the analyzer's read-only view of the catalog.
//!
//! The coverage analyzer takes a store at construction time instead of
//! reaching for a process-wide handle. `SqliteMappingStore` in
//! riskmap-storage is the production implementation; tests supply
//! in-memory fakes.
//!
//! Contract: unknown ids resolve to empty sets or `None`, never an
//! error. Analysis degrades gracefully rather than failing the whole
//! report. No mutation methods — the catalog is repopulated by the
//! external ETL collaborator between analyses.

use crate::errors::StorageError;
use crate::types::collections::IdSet;

/// Display fields for one risk, used to enrich report detail lists.
#[derive(Debug, Clone)]
pub struct RiskDisplay {
    pub risk_title: Option<String>,
    pub risk_description: Option<String>,
}

/// Display fields for one control, with the names of the capabilities
/// that contributed it.
#[derive(Debug, Clone)]
pub struct ControlDetail {
    pub control_id: String,
    pub control_description: Option<String>,
    pub capability_names: Vec<String>,
}

/// Read-only accessor over risks, controls, capabilities, and their
/// many-to-many mappings.
pub trait MappingStore {
    /// Total number of controls in the catalog.
    fn total_controls(&self) -> Result<i64, StorageError>;

    /// Total number of risks in the catalog.
    fn total_risks(&self) -> Result<i64, StorageError>;

    /// Ids of every risk in the catalog.
    fn all_risk_ids(&self) -> Result<IdSet, StorageError>;

    /// Distinct controls mapped to *any* capability (the denominator
    /// metric, independent of which capabilities are active).
    fn all_controls_in_any_capability(&self) -> Result<IdSet, StorageError>;

    /// Distinct controls mapped to any of the given capabilities.
    /// Unknown capability ids contribute nothing.
    fn controls_for_capabilities(
        &self,
        capability_ids: &IdSet,
    ) -> Result<IdSet, StorageError>;

    /// Controls required to mitigate the given risk. Empty for a risk
    /// with no `risk_control_mapping` rows (or an unknown risk id).
    fn required_controls_for_risk(&self, risk_id: &str) -> Result<IdSet, StorageError>;

    /// Display fields for a risk; `None` for an unknown id.
    fn risk_display(&self, risk_id: &str) -> Result<Option<RiskDisplay>, StorageError>;

    /// Display fields for the given controls, each with the names of
    /// the capabilities it belongs to. Unknown ids are omitted.
    fn control_details(
        &self,
        control_ids: &IdSet,
    ) -> Result<Vec<ControlDetail>, StorageError>;
}
