// --- File: crates/lessongrid_common/src/logging.rs ---
//! Logging utilities for the Lessongrid application.
//!
//! Provides a standardized way to initialize the tracing subscriber across
//! the Lessongrid binaries.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// This should be called once at the start of the application.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` still takes precedence for targets it names, so individual
/// modules can be turned up without recompiling.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("lessongrid={}", level).parse().unwrap());

    // Use try_init to handle the case where a global default subscriber has
    // already been set (e.g. in tests).
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
