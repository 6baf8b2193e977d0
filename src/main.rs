//! LogShield backend server
//!
//! Ingests synthetic HTTP access-log events, scores each for threat
//! likelihood with fixed heuristics, persists the result and auto-blocks
//! IPs whose score crosses the block threshold.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        LOGSHIELD                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────────────┐   ┌───────────────┐  │
//! │  │  API     │   │  Decision        │   │  Read-side    │  │
//! │  │  (Axum)  │──▶│  Pipeline        │   │  (stats,      │  │
//! │  │          │   │  (detection/)    │   │   export)     │  │
//! │  └──────────┘   └────────┬─────────┘   └───────┬───────┘  │
//! │                          ▼                     │          │
//! │                   ┌─────────────┐              │          │
//! │                   │ PostgreSQL  │◀─────────────┘          │
//! │                   └─────────────┘                         │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod detection;
mod error;
mod handlers;
mod models;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use detection::ScoringConfig;
use store::{EventStore, PgEventStore};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "logshield=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("LogShield server starting ({})", config.environment);
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));

    // Initialize database pool
    let pool = db::create_pool(&config.database_url).await
        .expect("Failed to create database pool");

    // Apply schema
    tracing::info!("Applying database schema...");
    db::run_migrations(&pool).await
        .expect("Failed to apply schema");

    // Build application state
    let state = AppState {
        pool: pool.clone(),
        store: Arc::new(PgEventStore::new(pool)),
        scoring: ScoringConfig::default(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-side queries go straight to the pool.
    pub pool: sqlx::PgPool,
    /// Ingestion writes go through the transactional store.
    pub store: Arc<dyn EventStore>,
    pub scoring: ScoringConfig,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::check))
        .route("/api/logs", post(handlers::logs::ingest).get(handlers::logs::list))
        .route("/api/stats", get(handlers::stats::overview))
        .route("/api/blocked-ips", get(handlers::blocked::list))
        .route("/api/export/:format", get(handlers::export::export))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
