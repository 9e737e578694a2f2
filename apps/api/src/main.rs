mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::dispatch::MatchDispatcher;
use crate::matching::store::{MatchStore, PgMatchStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Matching store + background worker
    let store: Arc<dyn MatchStore> = Arc::new(PgMatchStore::new(db));
    let dispatcher = MatchDispatcher::spawn(
        store.clone(),
        config.match_queue_capacity,
        config.match_concurrency,
    );
    info!(
        "Match worker ready (concurrency={}, queue={})",
        config.match_concurrency, config.match_queue_capacity
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        store,
        dispatcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the employer UI domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
