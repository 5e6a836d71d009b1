//! Storage errors.

use super::error_code::{self, RiskmapErrorCode};

/// Errors that can occur in the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy: {message}")]
    Busy { message: String },

    #[error("Migration to version {version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Transaction failed: {message}")]
    TransactionFailed { message: String },
}

impl RiskmapErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::SqliteError { .. } | Self::TransactionFailed { .. } => {
                error_code::STORAGE_ERROR
            }
        }
    }
}
