//! Traits at the seams between crates.

pub mod mapping_store;

pub use mapping_store::{ControlDetail, MappingStore, RiskDisplay};
