//! Environment-driven observability settings.

use core::str::FromStr;

/// Filter directive variable; `RUST_LOG` is consulted when unset.
pub const LOG_ENV: &str = "KEEL_LOG";
pub const LOG_FORMAT_ENV: &str = "KEEL_LOG_FORMAT";

pub(crate) const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive, e.g. `info,keel_core=debug`.
    pub filter: String,
    pub format: LogFormat,
    /// Unrecognised `KEEL_LOG_FORMAT` value that `format` replaced.
    pub rejected_format: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            rejected_format: None,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup(LOG_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        // Reported as a warning once a subscriber is installed.
        let (format, rejected_format) = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => match raw.parse() {
                Ok(format) => (format, None),
                Err(_) => (LogFormat::Json, Some(raw)),
            },
            None => (LogFormat::default(), None),
        };

        Self {
            filter,
            format,
            rejected_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_info_json() {
        let config = ObservabilityConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ObservabilityConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn keel_log_wins_over_rust_log() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("KEEL_LOG", "keel_core=trace"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.filter, "keel_core=trace");

        let config = ObservabilityConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.filter, "warn");
    }

    #[test]
    fn blank_filter_falls_back() {
        let config = ObservabilityConfig::from_lookup(lookup(&[("KEEL_LOG", "  ")]));
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn parses_formats_case_insensitively() {
        let config = ObservabilityConfig::from_lookup(lookup(&[("KEEL_LOG_FORMAT", "Pretty")]));
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        let config = ObservabilityConfig::from_lookup(lookup(&[("KEEL_LOG_FORMAT", "xml")]));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.rejected_format.as_deref(), Some("xml"));
    }

    #[test]
    fn known_format_is_not_rejected() {
        let config = ObservabilityConfig::from_lookup(lookup(&[("KEEL_LOG_FORMAT", "compact")]));
        assert_eq!(config.rejected_format, None);
    }
}
