//! Tracing/logging initialization.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_FILTER, LogFormat, ObservabilityConfig};

/// Initialize tracing/logging for the process.
///
/// An invalid filter directive falls back to `info` and is reported as a
/// warning through the installed subscriber. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let (filter, rejected_filter) = lenient_filter(&config.filter);
    if install(filter, config.format).is_err() {
        return;
    }
    if let Some(reason) = rejected_filter {
        ::tracing::warn!(filter = %config.filter, %reason, "invalid log filter; using the default");
    }
    warn_rejected_format(config);
}

/// Strict variant of [`init`]: an invalid filter or an already installed
/// subscriber is an error.
pub fn try_init(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter `{}`", config.filter))?;
    install(filter, config.format).context("a global tracing subscriber is already installed")?;
    warn_rejected_format(config);
    Ok(())
}

/// Parse `directive`, falling back to the default filter with the reason.
fn lenient_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err.to_string())),
    }
}

fn install(filter: EnvFilter, format: LogFormat) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

fn warn_rejected_format(config: &ObservabilityConfig) {
    if let Some(raw) = &config.rejected_format {
        ::tracing::warn!(format = %raw, "unknown log format; using json");
    }
}
