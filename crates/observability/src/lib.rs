//! Tracing/logging setup shared by binaries and test harnesses built on keel.

pub mod config;

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}

/// Like [`init`], but reports why a subscriber could not be installed.
pub fn try_init(config: &ObservabilityConfig) -> anyhow::Result<()> {
    tracing::try_init(config)
}
