//! SqliteMappingStore — the production `MappingStore` implementation.

use std::sync::Arc;

use riskmap_core::errors::StorageError;
use riskmap_core::traits::{ControlDetail, MappingStore, RiskDisplay};
use riskmap_core::types::collections::IdSet;

use crate::connection::DatabaseManager;
use crate::queries::catalog;

/// Read-only adapter over the catalog tables, served from the read
/// pool. Constructed once and handed to the analyzer (no global
/// store handle).
pub struct SqliteMappingStore {
    db: Arc<DatabaseManager>,
}

impl SqliteMappingStore {
    /// Create a store over an opened database.
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl MappingStore for SqliteMappingStore {
    fn total_controls(&self) -> Result<i64, StorageError> {
        self.db.with_reader(catalog::count_controls)
    }

    fn total_risks(&self) -> Result<i64, StorageError> {
        self.db.with_reader(catalog::count_risks)
    }

    fn all_risk_ids(&self) -> Result<IdSet, StorageError> {
        self.db.with_reader(catalog::all_risk_ids)
    }

    fn all_controls_in_any_capability(&self) -> Result<IdSet, StorageError> {
        self.db.with_reader(catalog::controls_in_any_capability)
    }

    fn controls_for_capabilities(
        &self,
        capability_ids: &IdSet,
    ) -> Result<IdSet, StorageError> {
        self.db
            .with_reader(|conn| catalog::controls_for_capabilities(conn, capability_ids))
    }

    fn required_controls_for_risk(&self, risk_id: &str) -> Result<IdSet, StorageError> {
        self.db
            .with_reader(|conn| catalog::required_controls_for_risk(conn, risk_id))
    }

    fn risk_display(&self, risk_id: &str) -> Result<Option<RiskDisplay>, StorageError> {
        self.db.with_reader(|conn| catalog::risk_display(conn, risk_id))
    }

    fn control_details(
        &self,
        control_ids: &IdSet,
    ) -> Result<Vec<ControlDetail>, StorageError> {
        self.db
            .with_reader(|conn| catalog::control_details(conn, control_ids))
    }
}
