//! HTTP surface over a [`StockGateway`]

pub mod response;
pub mod routes;

pub use response::ApiError;

use crate::logo::LogoResolver;
use crate::service::StockGateway;
use axum::{Router, routing::get};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<StockGateway>,
    pub logos: Arc<LogoResolver>,
}

impl AppState {
    pub fn new(gateway: StockGateway, logos: LogoResolver) -> Self {
        Self {
            gateway: Arc::new(gateway),
            logos: Arc::new(logos),
        }
    }
}

/// Build the router with every route registered
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/quotes", get(routes::batch_handler))
        .route("/quote/{symbol}", get(routes::quote_handler))
        .route("/quote-details/{symbol}", get(routes::details_handler))
        .route("/historical/{symbol}", get(routes::historical_handler))
        .route("/search", get(routes::search_handler))
        .route("/logo/{symbol}", get(routes::logo_handler))
        .route(
            "/watchlist",
            get(routes::watchlist_list_handler)
                .post(routes::watchlist_add_handler)
                .delete(routes::watchlist_remove_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;

    tracing::info!("Registering routes:");
    tracing::info!("  GET    /quotes?type=popular|gainers|losers");
    tracing::info!("  GET    /quote/{{symbol}}");
    tracing::info!("  GET    /quote-details/{{symbol}}");
    tracing::info!("  GET    /historical/{{symbol}}?period=5d|1mo|3mo|6mo|1y");
    tracing::info!("  GET    /search?q=text");
    tracing::info!("  GET    /logo/{{symbol}}?size=64");
    tracing::info!("  GET    /watchlist, POST /watchlist, DELETE /watchlist?symbol=S");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
