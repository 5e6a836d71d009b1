//! Configuration system for Riskmap.
//! TOML-based, 3-layer resolution: env > project config > defaults.

pub mod database_config;
pub mod riskmap_config;

pub use database_config::DatabaseConfig;
pub use riskmap_config::RiskmapConfig;
