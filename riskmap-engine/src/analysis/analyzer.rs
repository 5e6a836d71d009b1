//! The coverage analyzer.
//!
//! Classifies every risk in the catalog against the active control
//! set derived from a capability/control selection. Pure and
//! deterministic for a fixed store snapshot: no writes, no domain
//! errors. Unknown or stale ids degrade to empty sets so the
//! dashboard always renders a complete (if zeroed) report.

use riskmap_core::errors::StorageError;
use riskmap_core::traits::MappingStore;
use riskmap_core::types::collections::IdSet;

use super::report::{
    ActiveControlEntry, AnalysisRequest, CoverageReport, ExposedRiskEntry,
    PartiallyCoveredRiskEntry,
};

const NO_TITLE: &str = "No title";
const NO_DESCRIPTION: &str = "No description";

/// Computes coverage reports over an injected mapping store.
pub struct CoverageAnalyzer<S: MappingStore> {
    store: S,
}

impl<S: MappingStore> CoverageAnalyzer<S> {
    /// Create an analyzer over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Classify every risk under the requested active selection.
    ///
    /// A control is active only if one of its capabilities is in
    /// `capability_ids` AND, when `control_ids` is present, the
    /// control is listed there too. A risk is fully covered when all
    /// of its required controls are active, partially covered when
    /// some are, and exposed otherwise. A risk with no required
    /// controls at all is always exposed: an unmapped risk can never
    /// be covered by definition.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<CoverageReport, StorageError> {
        let total_controls = self.store.total_controls()?;
        let controls_in_capabilities = self.store.all_controls_in_any_capability()?;

        let active_capability_ids: IdSet =
            request.capability_ids.iter().cloned().collect();
        let controls_from_active =
            self.store.controls_for_capabilities(&active_capability_ids)?;

        // Control-level override: narrow to the intersection when the
        // caller supplied an explicit control list.
        let active_controls: IdSet = match &request.control_ids {
            Some(control_ids) => {
                let requested: IdSet = control_ids.iter().cloned().collect();
                controls_from_active
                    .intersection(&requested)
                    .cloned()
                    .collect()
            }
            None => controls_from_active,
        };

        let active_controls_list: Vec<ActiveControlEntry> = self
            .store
            .control_details(&active_controls)?
            .into_iter()
            .map(|d| ActiveControlEntry {
                control_id: d.control_id,
                control_description: d.control_description,
                capability_names: d.capability_names,
            })
            .collect();

        // Partition every risk into exactly one of the three classes.
        let all_risks = self.store.all_risk_ids()?;
        let mut fully_covered = 0i64;
        let mut partially_covered_risks_list = Vec::new();
        let mut exposed_risks_list = Vec::new();

        for risk_id in &all_risks {
            let required = self.store.required_controls_for_risk(risk_id)?;
            let active_required: IdSet =
                required.intersection(&active_controls).cloned().collect();

            if !required.is_empty() && active_required.len() == required.len() {
                fully_covered += 1;
                continue;
            }

            let (risk_title, risk_description) = self.display_fields(risk_id)?;

            if required.is_empty() {
                // No required controls: always exposed, with an empty
                // required list so the UI can tell it apart.
                exposed_risks_list.push(ExposedRiskEntry {
                    risk_id: risk_id.clone(),
                    risk_title,
                    risk_description,
                    required_controls: Vec::new(),
                });
            } else if active_required.is_empty() {
                exposed_risks_list.push(ExposedRiskEntry {
                    risk_id: risk_id.clone(),
                    risk_title,
                    risk_description,
                    required_controls: required.into_iter().collect(),
                });
            } else {
                let inactive_controls: Vec<String> =
                    required.difference(&active_required).cloned().collect();
                partially_covered_risks_list.push(PartiallyCoveredRiskEntry {
                    risk_id: risk_id.clone(),
                    risk_title,
                    risk_description,
                    active_controls: active_required.into_iter().collect(),
                    inactive_controls,
                    total_controls_required: required.len() as i64,
                });
            }
        }

        // Counts derive from the partition itself, so the sum always
        // equals the number of risks classified.
        let partially_covered = partially_covered_risks_list.len() as i64;
        let exposed = exposed_risks_list.len() as i64;

        Ok(CoverageReport {
            total_controls,
            controls_in_capabilities: controls_in_capabilities.len() as i64,
            active_controls: active_controls.len() as i64,
            total_risks: all_risks.len() as i64,
            active_risks: fully_covered,
            partially_covered_risks: partially_covered,
            exposed_risks: exposed,
            active_controls_list,
            partially_covered_risks_list,
            exposed_risks_list,
        })
    }

    fn display_fields(&self, risk_id: &str) -> Result<(String, String), StorageError> {
        let display = self.store.risk_display(risk_id)?;
        let title = display
            .as_ref()
            .and_then(|d| d.risk_title.clone())
            .unwrap_or_else(|| NO_TITLE.to_string());
        let description = display
            .and_then(|d| d.risk_description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        Ok((title, description))
    }
}
