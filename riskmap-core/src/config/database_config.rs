//! Database configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database file. Default: `riskmap.db`.
    pub path: Option<String>,
    /// Number of read-only connections in the pool. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl DatabaseConfig {
    /// Returns the effective database path, defaulting to `riskmap.db`.
    pub fn effective_path(&self) -> &str {
        self.path.as_deref().unwrap_or("riskmap.db")
    }

    /// Returns the effective read pool size, defaulting to 4.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }
}
