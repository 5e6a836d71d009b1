//! Error handling for Riskmap.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod scenario_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::RiskmapErrorCode;
pub use scenario_error::ScenarioError;
pub use storage_error::StorageError;
