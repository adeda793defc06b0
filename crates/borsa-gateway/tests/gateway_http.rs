//! End-to-end tests: a real listener serving the router, driven by GatewayClient

use async_trait::async_trait;
use borsa_gateway::server::{self, AppState};
use borsa_gateway::{
    Bar, BatchKind, ClientError, GatewayClient, GatewayConfig, GatewayError, Listing,
    LogoResolver, Period, StockDataSource, StockGateway,
};
use chrono::{DateTime, Duration as ChronoDuration};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Canned series keyed by ticker
struct FakeSource {
    bars: HashMap<&'static str, Vec<Bar>>,
}

impl FakeSource {
    fn new(closes: &[(&'static str, &[f64])]) -> Self {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let bars = closes
            .iter()
            .map(|(symbol, closes)| {
                let series = closes
                    .iter()
                    .enumerate()
                    .map(|(i, close)| Bar {
                        timestamp: start + ChronoDuration::days(i as i64),
                        open: *close,
                        high: close + 1.0,
                        low: close - 1.0,
                        close: *close,
                        volume: 100,
                    })
                    .collect();
                (*symbol, series)
            })
            .collect();
        Self { bars }
    }
}

#[async_trait]
impl StockDataSource for FakeSource {
    async fn daily_bars(&self, symbol: &str, _period: Period) -> borsa_gateway::Result<Vec<Bar>> {
        self.bars
            .get(symbol)
            .cloned()
            .ok_or_else(|| GatewayError::YahooFinanceError(format!("Unknown symbol {symbol}")))
    }

    async fn search(&self, _query: &str) -> borsa_gateway::Result<Vec<Listing>> {
        Ok(Vec::new())
    }
}

async fn spawn_gateway() -> GatewayClient {
    let source = FakeSource::new(&[
        ("THYAO", &[100.0, 103.0]),
        ("GARAN", &[50.0, 49.0]),
        ("ASELS", &[40.0, 42.0]),
    ]);
    let config = GatewayConfig::builder()
        .popular_symbols(["THYAO", "GARAN", "NOPE"])
        .build()
        .unwrap();
    let gateway = StockGateway::new(Arc::new(source), Arc::new(config));
    let state = AppState::new(gateway, LogoResolver::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });

    GatewayClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_quote_round_trip() {
    let client = spawn_gateway().await;
    let quote = client.fetch_quote("thyao").await.unwrap();
    assert_eq!(quote.symbol, "THYAO");
    assert_eq!(quote.name, "Türk Hava Yolları");
    assert!((quote.change_percent - 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_symbol_surfaces_server_message() {
    let client = spawn_gateway().await;
    let err = client.fetch_quote("UNKNOWN").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("UNKNOWN"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_search_is_bad_request() {
    let client = spawn_gateway().await;
    let err = client.search("").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 400, ref message } if message == "Query parameter is required"
    ));
}

#[tokio::test]
async fn test_hydrate_drops_failures_and_keeps_order() {
    let client = spawn_gateway().await;
    let symbols = ["GARAN", "NOPE", "THYAO"].map(String::from);
    let quotes = client.hydrate(&symbols).await;
    let got: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(got, ["GARAN", "THYAO"]);
}

#[tokio::test]
async fn test_historical_and_details() {
    let client = spawn_gateway().await;

    let data = client
        .fetch_historical("ASELS", Period::ThreeMonths)
        .await
        .unwrap();
    assert_eq!(data.meta.period, Period::ThreeMonths);
    assert_eq!(data.quotes.len(), 2);
    assert!((data.meta.fifty_two_week_high - 43.0).abs() < 1e-9);

    let details = client.fetch_details("ASELS").await.unwrap();
    assert_eq!(details.sector.as_deref(), Some("Defense"));
    assert_eq!(details.average_volume, Some(100));
}

#[tokio::test]
async fn test_batches() {
    let client = spawn_gateway().await;

    let popular = client.fetch_batch(BatchKind::Popular).await.unwrap();
    let got: Vec<_> = popular.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(got, ["THYAO", "GARAN"]);

    let gainers = client.fetch_batch(BatchKind::Gainers).await.unwrap();
    let got: Vec<_> = gainers.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(got, ["ASELS", "THYAO", "GARAN"]);

    let losers = client.fetch_batch(BatchKind::Losers).await.unwrap();
    assert_eq!(losers[0].symbol, "GARAN");
}

#[tokio::test]
async fn test_logo_and_watchlist_endpoints() {
    let client = spawn_gateway().await;
    let urls = client.logo("XYZAB", 48).await.unwrap();
    assert_eq!(urls.primary, "https://img.logo.dev/xyzab.is?size=48");

    let http = reqwest::Client::new();
    let base = client.base_url().clone();

    let list: Vec<String> = http
        .get(base.join("watchlist").unwrap())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());

    let ack: serde_json::Value = http
        .post(base.join("watchlist").unwrap())
        .json(&serde_json::json!({"symbol": "sise"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ack["success"], serde_json::json!(true));
    assert_eq!(ack["symbol"], serde_json::json!("SISE"));
}
