//! Route handlers

use crate::logo::DEFAULT_LOGO_SIZE;
use crate::model::{
    BatchKind, HistoricalData, LogoUrls, Period, Quote, QuoteDetails, WatchlistAck,
};
use crate::server::{ApiError, AppState};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use borsa_utils::normalize_symbol;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

const STOCK_FALLBACK: &str = "Failed to fetch stock";
const STOCKS_FALLBACK: &str = "Failed to fetch stocks";
const SEARCH_FALLBACK: &str = "Failed to search stocks";
const DATA_FALLBACK: &str = "Data could not be retrieved";
const WATCHLIST_MESSAGE: &str = "Watchlist is managed client-side";

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Query parameters for /quotes
#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Query parameters for /historical/{symbol}
#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    pub period: Option<String>,
}

/// Query parameters for /search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query parameters for /logo/{symbol}
#[derive(Debug, Deserialize)]
pub struct LogoQuery {
    pub size: Option<String>,
}

/// Query parameters for DELETE /watchlist
#[derive(Debug, Deserialize)]
pub struct WatchlistQuery {
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WatchlistBody {
    symbol: String,
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /quotes?type=popular|gainers|losers
#[instrument(skip(state))]
pub async fn batch_handler(
    State(state): State<AppState>,
    Query(params): Query<BatchQuery>,
) -> ApiResult<Vec<Quote>> {
    let kind = BatchKind::from_query(params.kind.as_deref());
    state
        .gateway
        .batch(kind)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(&e, STOCKS_FALLBACK))
}

/// GET /quote/{symbol}
#[instrument(skip(state))]
pub async fn quote_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Quote> {
    state
        .gateway
        .quote(&symbol)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(&e, STOCK_FALLBACK))
}

/// GET /quote-details/{symbol}
#[instrument(skip(state))]
pub async fn details_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<QuoteDetails> {
    state
        .gateway
        .details(&symbol)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(&e, DATA_FALLBACK))
}

/// GET /historical/{symbol}?period=1mo
#[instrument(skip(state))]
pub async fn historical_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<HistoricalQuery>,
) -> ApiResult<HistoricalData> {
    let period = match params.period.as_deref() {
        None | Some("") => Period::default(),
        Some(raw) => raw
            .parse::<Period>()
            .map_err(|e| ApiError::from_gateway(&e, DATA_FALLBACK))?,
    };

    state
        .gateway
        .historical(&symbol, period)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(&e, DATA_FALLBACK))
}

/// GET /search?q=text
#[instrument(skip(state))]
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<Quote>> {
    let query = params.q.unwrap_or_default();
    state
        .gateway
        .search(&query)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(&e, SEARCH_FALLBACK))
}

/// GET /logo/{symbol}?size=64
#[instrument(skip(state))]
pub async fn logo_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<LogoQuery>,
) -> ApiResult<LogoUrls> {
    let size = match params.size.as_deref() {
        None | Some("") => DEFAULT_LOGO_SIZE,
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid size: {raw}")))?,
    };

    let symbol =
        normalize_symbol(&symbol).ok_or_else(|| ApiError::bad_request("Symbol is required"))?;
    Ok(Json(state.logos.resolve(&symbol, size)))
}

/// GET /watchlist
///
/// Watchlists live in client storage; the server never holds one.
pub async fn watchlist_list_handler() -> Json<Vec<String>> {
    Json(Vec::new())
}

/// POST /watchlist with `{"symbol": "..."}`
pub async fn watchlist_add_handler(body: Bytes) -> ApiResult<WatchlistAck> {
    let body: WatchlistBody = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;
    let symbol = normalize_symbol(&body.symbol)
        .ok_or_else(|| ApiError::bad_request("Symbol is required"))?;
    Ok(Json(acknowledge(symbol)))
}

/// DELETE /watchlist?symbol=S
pub async fn watchlist_remove_handler(
    Query(params): Query<WatchlistQuery>,
) -> ApiResult<WatchlistAck> {
    let symbol = params
        .symbol
        .as_deref()
        .and_then(normalize_symbol)
        .ok_or_else(|| ApiError::bad_request("Symbol is required"))?;
    Ok(Json(acknowledge(symbol)))
}

fn acknowledge(symbol: String) -> WatchlistAck {
    WatchlistAck {
        success: true,
        message: WATCHLIST_MESSAGE.to_string(),
        symbol,
    }
}
