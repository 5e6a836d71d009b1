//! # riskmap-core
//!
//! Shared foundation for the Riskmap coverage engine: domain records,
//! error enums, configuration, tracing setup, and the `MappingStore`
//! trait that decouples the analyzer from its storage backend.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
