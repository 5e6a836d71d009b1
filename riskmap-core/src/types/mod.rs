//! Core domain types shared across the workspace.

pub mod collections;
pub mod records;

pub use collections::{FxHashMap, FxHashSet};
pub use records::{
    Capability, CapabilitySelection, Control, ControlSelection, Risk, Scenario,
};
