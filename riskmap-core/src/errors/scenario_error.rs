//! Scenario manager errors.
//!
//! Typed error kinds replace HTTP-exception control flow: the API
//! boundary maps each kind to a transport status (404 for `NotFound`,
//! 403 for `Forbidden`, 400 for `DuplicateName`/`Validation`, 500 for
//! `Storage`).

use super::error_code::{self, RiskmapErrorCode};
use super::StorageError;

/// Errors raised by scenario and selection operations.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario not found")]
    NotFound { scenario_id: i64 },

    #[error("Access denied: scenario belongs to another user")]
    Forbidden { scenario_id: i64, user_id: i64 },

    #[error(
        "Scenario name '{name}' already exists for this user. \
         Please choose a different name."
    )]
    DuplicateName { name: String },

    #[error("Invalid selection at index {index}: missing {field}")]
    Validation { index: usize, field: &'static str },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RiskmapErrorCode for ScenarioError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Forbidden { .. } => error_code::FORBIDDEN,
            Self::DuplicateName { .. } => error_code::DUPLICATE_NAME,
            Self::Validation { .. } => error_code::VALIDATION_ERROR,
            Self::Storage(e) => e.error_code(),
        }
    }
}
