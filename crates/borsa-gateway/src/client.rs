//! HTTP client for the gateway surface
//!
//! Every call resolves to either the decoded payload or a [`ClientError`]
//! carrying the server's `{"error": ...}` message.

use crate::model::{BatchKind, HistoricalData, LogoUrls, Period, Quote, QuoteDetails};
use crate::server::response::ErrorBody;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Client side failures
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status with the server's message
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message to show a user
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Typed client for a running gateway
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(base_url: &str, http: reqwest::Client) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_quote(&self, symbol: &str) -> ClientResult<Quote> {
        self.get(self.endpoint(&["quote", symbol])?).await
    }

    pub async fn fetch_details(&self, symbol: &str) -> ClientResult<QuoteDetails> {
        self.get(self.endpoint(&["quote-details", symbol])?).await
    }

    pub async fn fetch_historical(
        &self,
        symbol: &str,
        period: Period,
    ) -> ClientResult<HistoricalData> {
        let mut url = self.endpoint(&["historical", symbol])?;
        url.query_pairs_mut().append_pair("period", period.as_str());
        self.get(url).await
    }

    pub async fn search(&self, query: &str) -> ClientResult<Vec<Quote>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut().append_pair("q", query);
        self.get(url).await
    }

    pub async fn fetch_batch(&self, kind: BatchKind) -> ClientResult<Vec<Quote>> {
        let mut url = self.endpoint(&["quotes"])?;
        url.query_pairs_mut().append_pair("type", kind.as_str());
        self.get(url).await
    }

    pub async fn logo(&self, symbol: &str, size: u32) -> ClientResult<LogoUrls> {
        let mut url = self.endpoint(&["logo", symbol])?;
        url.query_pairs_mut().append_pair("size", &size.to_string());
        self.get(url).await
    }

    /// Quotes for `symbols`, fetched concurrently
    ///
    /// Symbols that fail are dropped; the rest keep their input order.
    pub async fn hydrate(&self, symbols: &[String]) -> Vec<Quote> {
        let results = join_all(symbols.iter().map(|s| self.fetch_quote(s))).await;

        symbols
            .iter()
            .zip(results)
            .filter_map(|(symbol, result)| match result {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!(%symbol, error = %e, "Skipping symbol");
                    None
                }
            })
            .collect()
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .map(|body| body.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GatewayClient {
        GatewayClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            GatewayClient::new("not a url", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            GatewayClient::new("mailto:ops@example.com", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client("http://localhost:3000")
            .endpoint(&["quote", "THYAO"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/quote/THYAO");

        let url = client("http://localhost:3000/api/")
            .endpoint(&["quote", "THYAO"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/quote/THYAO");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = client("http://localhost:3000")
            .endpoint(&["quote", "A/B C"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/quote/A%2FB%20C");
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Query parameter is required".into(),
        };
        assert_eq!(err.message(), "Query parameter is required");
        assert_eq!(err.to_string(), "Query parameter is required (HTTP 400)");
    }

    #[tokio::test]
    async fn test_hydrate_empty_is_empty() {
        let quotes = client("http://127.0.0.1:9").hydrate(&[]).await;
        assert!(quotes.is_empty());
    }
}
