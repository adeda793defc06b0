//! Command implementations

use crate::cli::{Cli, Commands, FavoritesAction, WatchlistAction};
use crate::render;
use anyhow::{Context, Result, anyhow, bail};
use borsa_gateway::server::{self, AppState};
use borsa_gateway::{GatewayClient, GatewayConfig, LogoResolver, StockGateway, YahooSource};
use borsa_store::{FileStorage, MemoryStorage, WatchStore};
use borsa_utils::{Settings, normalize_symbol};
use comfy_table::Table;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Print `value` as pretty JSON or as the table built from it
fn emit<T: Serialize>(json: bool, value: &T, table: impl FnOnce(&T) -> Table) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", table(value));
    }
    Ok(())
}

fn require(raw: &str) -> Result<String> {
    normalize_symbol(raw).ok_or_else(|| anyhow!("Symbol is required"))
}

pub async fn run(cli: Cli, settings: &Settings) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Serve { host, port } => serve(host, port).await,
        Commands::Quote { symbol } => {
            let quote = client(settings)?.fetch_quote(&symbol).await?;
            emit(json, &quote, |q| render::quotes(std::slice::from_ref(q)))
        }
        Commands::Details { symbol } => {
            let details = client(settings)?.fetch_details(&symbol).await?;
            emit(json, &details, render::details)
        }
        Commands::History { symbol, period } => {
            let data = client(settings)?.fetch_historical(&symbol, period).await?;
            if !json {
                println!(
                    "{} {}: 52w high {:.2}, 52w low {:.2}",
                    data.meta.symbol,
                    data.meta.period,
                    data.meta.fifty_two_week_high,
                    data.meta.fifty_two_week_low
                );
            }
            emit(json, &data, render::history)
        }
        Commands::Search { query } => {
            let quotes = client(settings)?.search(&query).await?;
            emit(json, &quotes, |q| render::quotes(q))
        }
        Commands::List { kind } => {
            let quotes = client(settings)?.fetch_batch(kind.into()).await?;
            emit(json, &quotes, |q| render::quotes(q))
        }
        Commands::Logo { symbol, size } => {
            let urls = client(settings)?.logo(&symbol, size).await?;
            emit(json, &urls, |u| render::logo(&symbol, u))
        }
        Commands::Favorites { action } => {
            let mut store = open_store(&settings.data_dir)?;
            match action {
                FavoritesAction::List => {
                    let symbols = store.favorites().to_vec();
                    show_tracked(settings, json, "favorites", &symbols).await
                }
                FavoritesAction::Toggle { symbol } => {
                    let (symbol, now_favorite) = toggle_favorite(&mut store, &symbol)?;
                    if now_favorite {
                        println!("{symbol} added to favorites");
                    } else {
                        println!("{symbol} removed from favorites");
                    }
                    Ok(())
                }
            }
        }
        Commands::Watchlist { action } => {
            let mut store = open_store(&settings.data_dir)?;
            match action {
                WatchlistAction::List => {
                    let symbols = store.watchlist().to_vec();
                    show_tracked(settings, json, "watchlist", &symbols).await
                }
                WatchlistAction::Add { symbol } => {
                    let symbol = add_to_watchlist(&mut store, &symbol)?;
                    println!("{symbol} is on the watchlist");
                    Ok(())
                }
                WatchlistAction::Remove { symbol } => {
                    let symbol = remove_from_watchlist(&mut store, &symbol)?;
                    println!("{symbol} is not on the watchlist");
                    Ok(())
                }
            }
        }
        Commands::Compare { first, second } => {
            let pair = compare_pair(&first, &second)?;
            let quotes = client(settings)?.hydrate(&pair).await;
            match quotes.as_slice() {
                [a, b] => emit(json, &quotes, |_| render::compare(a, b)),
                _ => bail!("Could not fetch quotes for {} and {}", pair[0], pair[1]),
            }
        }
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut builder = GatewayConfig::builder();
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    let config = builder.with_env().build()?;
    let addr = config.bind_addr().await?;

    info!(
        suffix = %config.symbol_suffix,
        batch_limit = config.batch_limit,
        max_concurrency = config.max_concurrency,
        "Starting gateway"
    );

    let source = Arc::new(YahooSource::new(config.symbol_suffix.clone()));
    let logos = LogoResolver::new(config.logo_token.clone());
    let gateway = StockGateway::new(source, Arc::new(config));

    server::serve(AppState::new(gateway, logos), addr)
        .await
        .with_context(|| format!("Gateway server on {addr} failed"))
}

fn client(settings: &Settings) -> Result<GatewayClient> {
    let timeout = settings.request_timeout;
    debug!(url = %settings.gateway_url, ?timeout, "Connecting to gateway");
    Ok(GatewayClient::new(&settings.gateway_url, timeout)?)
}

async fn show_tracked(
    settings: &Settings,
    json: bool,
    label: &str,
    symbols: &[String],
) -> Result<()> {
    if symbols.is_empty() {
        println!("No symbols in {label}");
        return Ok(());
    }
    let quotes = client(settings)?.hydrate(symbols).await;
    emit(json, &quotes, |q| render::tracked(symbols, q))
}

fn open_store(dir: &Path) -> Result<WatchStore> {
    let storage = FileStorage::new(dir)
        .with_context(|| format!("Cannot open data directory {}", dir.display()))?;
    Ok(WatchStore::open(Box::new(storage)))
}

/// Toggle `raw` in favorites and persist; returns the symbol and whether it is now a favorite
fn toggle_favorite(store: &mut WatchStore, raw: &str) -> Result<(String, bool)> {
    let symbol = require(raw)?;
    store.toggle_favorite(&symbol);
    store.persist().context("Failed to save favorites")?;
    let now_favorite = store.is_favorite(&symbol);
    Ok((symbol, now_favorite))
}

fn add_to_watchlist(store: &mut WatchStore, raw: &str) -> Result<String> {
    let symbol = require(raw)?;
    store.add_to_watchlist(&symbol);
    store.persist().context("Failed to save watchlist")?;
    Ok(symbol)
}

fn remove_from_watchlist(store: &mut WatchStore, raw: &str) -> Result<String> {
    let symbol = require(raw)?;
    store.remove_from_watchlist(&symbol);
    store.persist().context("Failed to save watchlist")?;
    Ok(symbol)
}

/// Normalized compare pair, built through an in-memory session store
fn compare_pair(first: &str, second: &str) -> Result<Vec<String>> {
    let mut session = WatchStore::open(Box::new(MemoryStorage::new()));
    session.add_to_compare(first);
    session.add_to_compare(second);
    if !session.is_compare_full() {
        bail!("Compare needs two distinct symbols");
    }
    Ok(session.compare().to_vec())
}
