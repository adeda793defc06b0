//! Configuration for the gateway service and its HTTP surface

use crate::error::{GatewayError, Result};
use crate::universe::DEFAULT_POPULAR;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;

/// Configuration for gateway operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Interface the HTTP surface binds to
    pub host: String,

    /// Port the HTTP surface binds to
    pub port: u16,

    /// Suffix appended to BIST tickers for the upstream source
    pub symbol_suffix: String,

    /// Number of entries returned for gainers, losers and search
    pub batch_limit: usize,

    /// Upper bound on concurrent upstream fetches in one batch
    pub max_concurrency: usize,

    /// Symbols served for the `popular` batch
    pub popular_symbols: Vec<String>,

    /// logo.dev publishable token (optional)
    pub logo_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            symbol_suffix: ".IS".to_string(),
            batch_limit: 10,
            max_concurrency: 8,
            popular_symbols: DEFAULT_POPULAR.iter().map(ToString::to_string).collect(),
            logo_token: None,
        }
    }
}

impl GatewayConfig {
    /// Create a new configuration builder
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Resolve `host` and `port` to the socket address the HTTP surface binds
    ///
    /// Host names are looked up; IPv6 literals work with or without brackets.
    pub async fn bind_addr(&self) -> Result<SocketAddr> {
        let host = self
            .host
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');

        tokio::net::lookup_host((host, self.port))
            .await
            .map_err(|e| GatewayError::ConfigError(format!("Cannot resolve {}: {e}", self.host)))?
            .next()
            .ok_or_else(|| GatewayError::ConfigError(format!("No address for {}", self.host)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_limit == 0 {
            return Err(GatewayError::ConfigError(
                "batch_limit must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(GatewayError::ConfigError(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.popular_symbols.is_empty() {
            return Err(GatewayError::ConfigError(
                "popular_symbols must not be empty".to_string(),
            ));
        }

        if self.host.trim().is_empty() {
            return Err(GatewayError::ConfigError("host must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for GatewayConfig
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    symbol_suffix: Option<String>,
    batch_limit: Option<usize>,
    max_concurrency: Option<usize>,
    popular_symbols: Option<Vec<String>>,
    logo_token: Option<String>,
}

impl GatewayConfigBuilder {
    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the upstream ticker suffix
    pub fn symbol_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.symbol_suffix = Some(suffix.into());
        self
    }

    /// Set the batch size for gainers, losers and search
    pub fn batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    /// Set the concurrent upstream fetch bound
    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = Some(n);
        self
    }

    /// Set the popular symbol list
    pub fn popular_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.popular_symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Set the logo.dev token
    pub fn logo_token(mut self, token: impl Into<String>) -> Self {
        self.logo_token = Some(token.into());
        self
    }

    /// Load unset values from `BORSA_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Load unset values from an arbitrary variable lookup
    ///
    /// Values that fail to parse are ignored.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.host = self.host.or_else(|| lookup("BORSA_HOST"));
        self.port = self.port.or_else(|| parse_var(&lookup, "BORSA_PORT"));
        self.symbol_suffix = self.symbol_suffix.or_else(|| lookup("BORSA_SYMBOL_SUFFIX"));
        self.batch_limit = self
            .batch_limit
            .or_else(|| parse_var(&lookup, "BORSA_BATCH_LIMIT"));
        self.max_concurrency = self
            .max_concurrency
            .or_else(|| parse_var(&lookup, "BORSA_MAX_CONCURRENCY"));
        self.logo_token = self.logo_token.or_else(|| lookup("BORSA_LOGO_TOKEN"));
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<GatewayConfig> {
        let defaults = GatewayConfig::default();

        let config = GatewayConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            symbol_suffix: self.symbol_suffix.unwrap_or(defaults.symbol_suffix),
            batch_limit: self.batch_limit.unwrap_or(defaults.batch_limit),
            max_concurrency: self.max_concurrency.unwrap_or(defaults.max_concurrency),
            popular_symbols: self.popular_symbols.unwrap_or(defaults.popular_symbols),
            logo_token: self.logo_token,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
