mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod insights;
mod marketplace;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::token::SessionKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MarketplaceStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Marketplace API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL when configured, otherwise the bundled demo catalog
    let store: Arc<dyn MarketplaceStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            let store = MemoryStore::with_demo_catalog()?;
            info!("DATABASE_URL not set; serving the in-memory demo catalog");
            Arc::new(store)
        }
    };

    let sessions = SessionKeys::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.session_ttl_hours),
    );
    info!("Sessions expire after {}h", config.session_ttl_hours);

    let state = AppState {
        store,
        sessions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
