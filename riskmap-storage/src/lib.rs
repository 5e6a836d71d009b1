//! # riskmap-storage
//!
//! SQLite persistence for the Riskmap coverage engine: connection
//! management (serialized writer + read pool), schema migrations,
//! low-level query modules for the catalog and scenario tables, and
//! the `SqliteMappingStore` adapter consumed by the analyzer.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::DatabaseManager;
pub use store::SqliteMappingStore;
