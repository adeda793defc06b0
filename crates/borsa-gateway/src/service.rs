//! Gateway operations over an injected data source

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::model::{
    Bar, BatchKind, HistoricalData, HistoricalMeta, HistoricalPoint, Period, Quote, QuoteDetails,
};
use crate::source::StockDataSource;
use crate::universe;
use borsa_utils::normalize_symbol;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Quote gateway
///
/// Every call goes straight to the data source: no cache, no retry. Batch
/// operations fan out one request per symbol and keep whatever succeeded.
#[derive(Clone)]
pub struct StockGateway {
    source: Arc<dyn StockDataSource>,
    config: Arc<GatewayConfig>,
}

impl StockGateway {
    pub fn new(source: Arc<dyn StockDataSource>, config: Arc<GatewayConfig>) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Latest quote for `symbol`
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = require_symbol(symbol)?;
        let bars = self.source.daily_bars(&symbol, Period::FiveDays).await?;
        quote_from_bars(&symbol, &bars).ok_or(GatewayError::NotFound(symbol))
    }

    /// Quote plus company data and one-year statistics
    pub async fn details(&self, symbol: &str) -> Result<QuoteDetails> {
        let symbol = require_symbol(symbol)?;
        let bars = self.source.daily_bars(&symbol, Period::OneYear).await?;
        let quote = quote_from_bars(&symbol, &bars)
            .ok_or_else(|| GatewayError::NotFound(symbol.clone()))?;
        let (high, low) = year_range(&bars).unwrap_or((quote.high, quote.low));
        let average_volume = bars.iter().map(|b| b.volume).sum::<u64>() / bars.len() as u64;
        let company = universe::find(&symbol);

        Ok(QuoteDetails {
            symbol: quote.symbol,
            name: quote.name,
            price: quote.price,
            change: quote.change,
            change_percent: quote.change_percent,
            market_cap: None,
            pe_ratio: None,
            eps: None,
            dividend_yield: None,
            beta: None,
            sector: company.map(|c| c.sector.to_string()),
            industry: None,
            description: None,
            fifty_two_week_high: Some(high),
            fifty_two_week_low: Some(low),
            average_volume: Some(average_volume),
        })
    }

    /// Daily series for `period` with 52-week high and low
    pub async fn historical(&self, symbol: &str, period: Period) -> Result<HistoricalData> {
        let symbol = require_symbol(symbol)?;

        let (bars, year) = if period == Period::OneYear {
            let bars = self.source.daily_bars(&symbol, period).await?;
            let year = bars.clone();
            (bars, year)
        } else {
            futures::try_join!(
                self.source.daily_bars(&symbol, period),
                self.source.daily_bars(&symbol, Period::OneYear),
            )?
        };

        if bars.is_empty() {
            return Err(GatewayError::NotFound(symbol));
        }

        let (high, low) = year_range(&year)
            .or_else(|| year_range(&bars))
            .ok_or_else(|| GatewayError::NotFound(symbol.clone()))?;

        Ok(HistoricalData {
            quotes: bars.iter().map(HistoricalPoint::from).collect(),
            meta: HistoricalMeta {
                symbol,
                period,
                fifty_two_week_high: high,
                fifty_two_week_low: low,
            },
        })
    }

    /// Quotes for companies matching a free-text query
    ///
    /// Local company table hits come first, then upstream hits. An upstream
    /// failure only surfaces when the table had nothing either.
    pub async fn search(&self, query: &str) -> Result<Vec<Quote>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GatewayError::missing("Query parameter is required"));
        }

        let mut candidates: Vec<String> = universe::search(query)
            .map(|c| c.symbol.to_string())
            .collect();

        match self.source.search(query).await {
            Ok(listings) => {
                for symbol in listings.iter().filter_map(|l| normalize_symbol(&l.symbol)) {
                    if !candidates.contains(&symbol) {
                        candidates.push(symbol);
                    }
                }
            }
            Err(e) if candidates.is_empty() => return Err(e),
            Err(e) => warn!(query, error = %e, "Upstream search failed; using local matches"),
        }

        candidates.truncate(self.config.batch_limit);
        debug!(query, candidates = candidates.len(), "Hydrating search");
        Ok(self.quotes_for(candidates).await)
    }

    /// Predefined listing
    pub async fn batch(&self, kind: BatchKind) -> Result<Vec<Quote>> {
        let symbols: Vec<String> = match kind {
            BatchKind::Popular => self.config.popular_symbols.clone(),
            BatchKind::Gainers | BatchKind::Losers => {
                universe::symbols().map(ToString::to_string).collect()
            }
        };
        let requested = symbols.len();

        let mut quotes = self.quotes_for(symbols).await;
        if quotes.is_empty() && requested > 0 {
            return Err(GatewayError::Upstream(format!(
                "No quotes available for {kind} stocks"
            )));
        }

        match kind {
            BatchKind::Popular => {}
            BatchKind::Gainers => {
                quotes.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
                quotes.truncate(self.config.batch_limit);
            }
            BatchKind::Losers => {
                quotes.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent));
                quotes.truncate(self.config.batch_limit);
            }
        }

        Ok(quotes)
    }

    /// Fetch quotes concurrently, dropping symbols that fail
    async fn quotes_for(&self, symbols: Vec<String>) -> Vec<Quote> {
        stream::iter(symbols)
            .map(|symbol| async move {
                let result = self.quote(&symbol).await;
                (symbol, result)
            })
            .buffered(self.config.max_concurrency)
            .filter_map(|(symbol, result)| async move {
                match result {
                    Ok(quote) => Some(quote),
                    Err(e) => {
                        debug!(%symbol, error = %e, "Dropping symbol from batch");
                        None
                    }
                }
            })
            .collect()
            .await
    }
}

fn require_symbol(symbol: &str) -> Result<String> {
    normalize_symbol(symbol).ok_or_else(|| GatewayError::missing("Symbol is required"))
}

/// Quote from the trailing bars of a series
fn quote_from_bars(symbol: &str, bars: &[Bar]) -> Option<Quote> {
    let last = bars.last()?;
    let prev_close = bars.len().checked_sub(2).map(|i| bars[i].close);

    let change = prev_close.map_or(0.0, |prev| last.close - prev);
    let change_percent = match prev_close {
        Some(prev) if prev.abs() > f64::EPSILON => change / prev * 100.0,
        _ => 0.0,
    };

    Some(Quote {
        symbol: symbol.to_string(),
        name: universe::display_name(symbol),
        price: last.close,
        change,
        change_percent,
        open: last.open,
        high: last.high,
        low: last.low,
        volume: last.volume,
        timestamp: last.timestamp,
    })
}

/// Highest high and lowest low of a series
fn year_range(bars: &[Bar]) -> Option<(f64, f64)> {
    if bars.is_empty() {
        return None;
    }
    let high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    Some((high, low))
}
