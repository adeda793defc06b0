//! Wire types shared by the gateway service, HTTP surface and client

use crate::error::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One daily OHLCV bar from the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A search hit from the upstream source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
}

/// Price snapshot for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub timestamp: DateTime<Utc>,
}

/// Company details with yearly statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetails {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_volume: Option<u64>,
}

/// One point of a historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&Bar> for HistoricalPoint {
    fn from(bar: &Bar) -> Self {
        Self {
            date: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// Series metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalMeta {
    pub symbol: String,
    pub period: Period,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
}

/// Historical series response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalData {
    pub quotes: Vec<HistoricalPoint>,
    pub meta: HistoricalMeta,
}

/// Primary and fallback logo URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoUrls {
    pub primary: String,
    pub fallback: String,
}

/// Acknowledgement returned by the stateless watchlist endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistAck {
    pub success: bool,
    pub message: String,
    pub symbol: String,
}

/// Range of a historical request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    pub const ALL: [Self; 5] = [
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Range string understood by the upstream chart API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| GatewayError::invalid("period", s))
    }
}

/// Predefined multi-symbol listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    #[default]
    Popular,
    Gainers,
    Losers,
}

impl BatchKind {
    /// Parse a `type` query value; anything unrecognised means `popular`
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("gainers") => Self::Gainers,
            Some(v) if v.eq_ignore_ascii_case("losers") => Self::Losers,
            _ => Self::Popular,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Gainers => "gainers",
            Self::Losers => "losers",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_parsing() {
        assert_eq!("5d".parse::<Period>().unwrap(), Period::FiveDays);
        assert_eq!("1y".parse::<Period>().unwrap(), Period::OneYear);
        assert_eq!(Period::default(), Period::OneMonth);

        let err = "2w".parse::<Period>().unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_period_serde_matches_as_str() {
        for period in Period::ALL {
            let json = serde_json::to_value(period).unwrap();
            assert_eq!(json, json!(period.as_str()));
        }
    }

    #[test]
    fn test_batch_kind_falls_back_to_popular() {
        assert_eq!(BatchKind::from_query(Some("gainers")), BatchKind::Gainers);
        assert_eq!(BatchKind::from_query(Some("LOSERS")), BatchKind::Losers);
        assert_eq!(BatchKind::from_query(Some("whatever")), BatchKind::Popular);
        assert_eq!(BatchKind::from_query(None), BatchKind::Popular);
    }

    #[test]
    fn test_quote_uses_camel_case() {
        let quote = Quote {
            symbol: "THYAO".into(),
            name: "Türk Hava Yolları".into(),
            price: 300.0,
            change: 3.0,
            change_percent: 1.01,
            open: 297.0,
            high: 301.5,
            low: 296.0,
            volume: 1_000,
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["changePercent"], json!(1.01));
        assert!(value.get("change_percent").is_none());
    }

    #[test]
    fn test_details_skip_missing_fields() {
        let details = QuoteDetails {
            symbol: "GARAN".into(),
            name: "Garanti BBVA".into(),
            price: 100.0,
            change: 0.0,
            change_percent: 0.0,
            market_cap: None,
            pe_ratio: None,
            eps: None,
            dividend_yield: None,
            beta: None,
            sector: Some("Banking".into()),
            industry: None,
            description: None,
            fifty_two_week_high: Some(120.0),
            fifty_two_week_low: Some(80.0),
            average_volume: Some(5_000),
        };

        let value = serde_json::to_value(&details).unwrap();
        assert!(value.get("marketCap").is_none());
        assert_eq!(value["fiftyTwoWeekHigh"], json!(120.0));
        assert_eq!(value["sector"], json!("Banking"));
    }
}
