//! Upstream market data sources

pub mod yahoo;

pub use yahoo::YahooSource;

use crate::error::Result;
use crate::model::{Bar, Listing, Period};
use async_trait::async_trait;

/// Upstream provider of raw market data
///
/// Symbols passed in are bare BIST tickers (`THYAO`); any exchange suffix the
/// provider needs is its own business. Implementations must not cache or retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockDataSource: Send + Sync {
    /// Daily bars covering `period`, oldest first
    async fn daily_bars(&self, symbol: &str, period: Period) -> Result<Vec<Bar>>;

    /// Listings matching a free-text query
    async fn search(&self, query: &str) -> Result<Vec<Listing>>;
}
