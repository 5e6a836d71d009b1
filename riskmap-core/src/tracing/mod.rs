//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Riskmap tracing/logging system.
///
/// Reads the `RISKMAP_LOG` environment variable for per-subsystem log
/// levels. Format: `RISKMAP_LOG=riskmap_storage=debug,riskmap_engine=info`
///
/// Falls back to `riskmap=info` if `RISKMAP_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RISKMAP_LOG")
            .unwrap_or_else(|_| EnvFilter::new("riskmap=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
