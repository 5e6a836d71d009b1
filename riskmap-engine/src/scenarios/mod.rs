//! Scenario & selection management.

pub mod manager;
pub mod types;

pub use manager::ScenarioManager;
pub use types::{
    CapabilitySelectionsBulk, ControlSelectionsBulk, NewScenario, ScenarioUpdate,
    ScenarioWithSelections,
};
