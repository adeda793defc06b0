//! Quote gateway for Borsa Istanbul (BIST) stocks
//!
//! The gateway turns a ticker or a free-text query into calls against an
//! upstream market data source and normalizes every outcome into either a data
//! payload or an `{"error": message}` payload. It provides:
//!
//! - [`StockDataSource`]: the upstream seam, with a Yahoo Finance backed
//!   implementation ([`YahooSource`])
//! - [`StockGateway`]: quote, details, historical, search and batch operations
//! - [`server`]: the axum HTTP surface over a gateway
//! - [`GatewayClient`]: a reqwest client for that surface, including
//!   multi-symbol hydration
//! - [`universe`] and [`logo`]: static company data and logo URL resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use borsa_gateway::{GatewayConfig, StockGateway, YahooSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> borsa_gateway::Result<()> {
//!     let config = Arc::new(GatewayConfig::builder().with_env().build()?);
//!     let source = Arc::new(YahooSource::new(&config.symbol_suffix));
//!     let gateway = StockGateway::new(source, config);
//!
//!     let quote = gateway.quote("THYAO").await?;
//!     println!("{} {:.2} ({:+.2}%)", quote.symbol, quote.price, quote.change_percent);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logo;
pub mod model;
pub mod server;
pub mod service;
pub mod source;
pub mod universe;

pub use client::{ClientError, GatewayClient};
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use logo::LogoResolver;
pub use model::{
    Bar, BatchKind, HistoricalData, HistoricalMeta, HistoricalPoint, Listing, LogoUrls, Period,
    Quote, QuoteDetails, WatchlistAck,
};
pub use server::AppState;
pub use service::StockGateway;
pub use source::{StockDataSource, YahooSource};
