//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Process-wide settings shared by the binary and the libraries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment (development, production, ...)
    pub environment: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Directory holding persisted favorites and watchlist
    pub data_dir: PathBuf,
    /// Base URL of the gateway HTTP surface
    pub gateway_url: String,
    /// Per-request timeout for gateway client calls
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_filter: "info".to_string(),
            log_format: LogFormat::Pretty,
            data_dir: PathBuf::from(".borsa"),
            gateway_url: "http://127.0.0.1:3000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    /// Build settings from `BORSA_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            environment: lookup("BORSA_ENV").unwrap_or(defaults.environment),
            log_filter: lookup("BORSA_LOG").unwrap_or(defaults.log_filter),
            log_format: lookup("BORSA_LOG_FORMAT")
                .map_or(defaults.log_format, |v| LogFormat::parse(&v)),
            data_dir: lookup("BORSA_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            gateway_url: lookup("BORSA_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            request_timeout: lookup("BORSA_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map_or(defaults.request_timeout, Duration::from_secs),
        }
    }
}
