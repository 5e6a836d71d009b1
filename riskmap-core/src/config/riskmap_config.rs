//! Top-level Riskmap configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DatabaseConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RISKMAP_*`)
/// 2. Project config (`riskmap.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskmapConfig {
    pub database: DatabaseConfig,
}

impl RiskmapConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("riskmap.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskmapConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.database.read_pool_size {
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "database.read_pool_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref path) = config.database.path {
            if path.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "database.path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RiskmapConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: RiskmapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if file_config.database.path.is_some() {
            config.database.path = file_config.database.path;
        }
        if file_config.database.read_pool_size.is_some() {
            config.database.read_pool_size = file_config.database.read_pool_size;
        }
        Ok(())
    }

    /// Apply `RISKMAP_*` environment variable overrides.
    fn apply_env_overrides(config: &mut RiskmapConfig) {
        if let Ok(path) = std::env::var("RISKMAP_DB_PATH") {
            if !path.is_empty() {
                config.database.path = Some(path);
            }
        }
        if let Ok(size) = std::env::var("RISKMAP_READ_POOL_SIZE") {
            if let Ok(parsed) = size.parse::<usize>() {
                config.database.read_pool_size = Some(parsed);
            }
        }
    }
}
