//! Yahoo Finance backed data source

use crate::error::{GatewayError, Result};
use crate::model::{Bar, Listing, Period};
use crate::source::StockDataSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Exchange code Yahoo uses for Borsa Istanbul listings
const ISTANBUL_EXCHANGE: &str = "IST";

/// Yahoo Finance data source for BIST tickers
#[derive(Debug, Clone)]
pub struct YahooSource {
    suffix: String,
}

impl YahooSource {
    /// Create a source that appends `suffix` (normally `.IS`) to tickers
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Upstream ticker for a bare BIST symbol
    pub fn ticker(&self, symbol: &str) -> String {
        let symbol = symbol.trim().to_uppercase();
        if symbol.contains('.') {
            symbol
        } else {
            format!("{symbol}{}", self.suffix)
        }
    }

    /// Bare symbol for an upstream ticker, `None` if it is not a BIST listing
    pub fn bare_symbol<'a>(&self, ticker: &'a str, exchange: &str) -> Option<&'a str> {
        match ticker.strip_suffix(self.suffix.as_str()) {
            Some(bare) => Some(bare),
            None if exchange == ISTANBUL_EXCHANGE => Some(ticker),
            None => None,
        }
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| GatewayError::YahooFinanceError(e.to_string()))
    }
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new(".IS")
    }
}

#[async_trait]
impl StockDataSource for YahooSource {
    async fn daily_bars(&self, symbol: &str, period: Period) -> Result<Vec<Bar>> {
        let ticker = self.ticker(symbol);
        debug!(%ticker, %period, "Fetching daily bars");

        let provider = Self::connector()?;
        let response = provider
            .get_quote_range(&ticker, "1d", period.as_str())
            .await
            .map_err(|e| GatewayError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| GatewayError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| Bar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        debug!(query, "Searching Yahoo Finance");

        let provider = Self::connector()?;
        let result = provider
            .search_ticker(query)
            .await
            .map_err(|e| GatewayError::YahooFinanceError(e.to_string()))?;

        Ok(result
            .quotes
            .iter()
            .filter_map(|item| {
                let symbol = self.bare_symbol(&item.symbol, &item.exchange)?;
                let name = if item.long_name.is_empty() {
                    item.short_name.clone()
                } else {
                    item.long_name.clone()
                };
                Some(Listing {
                    symbol: symbol.to_string(),
                    name,
                    exchange: Some(item.exchange.clone()),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_appends_suffix() {
        let source = YahooSource::default();
        assert_eq!(source.ticker("thyao"), "THYAO.IS");
        assert_eq!(source.ticker("GARAN.IS"), "GARAN.IS");
    }

    #[test]
    fn test_bare_symbol() {
        let source = YahooSource::default();
        assert_eq!(source.bare_symbol("THYAO.IS", "IST"), Some("THYAO"));
        assert_eq!(source.bare_symbol("XU100", "IST"), Some("XU100"));
        assert_eq!(source.bare_symbol("AAPL", "NMS"), None);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_daily_bars() {
        let source = YahooSource::default();
        let bars = source.daily_bars("THYAO", Period::OneMonth).await.unwrap();
        assert!(!bars.is_empty());
        assert!(bars.last().unwrap().close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search() {
        let source = YahooSource::default();
        let listings = source.search("Turkcell").await.unwrap();
        assert!(listings.iter().any(|l| l.symbol == "TCELL"));
    }
}
