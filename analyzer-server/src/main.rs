//! Boat Analyzer Server
//!
//! Upload a race vessel's telemetry log, get a qualification verdict.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    BOAT ANALYZER                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   multipart   ┌────────────────────────┐  │
//! │  │  Axum     │ ────────────► │  spawn_blocking         │  │
//! │  │  routes   │               │  boat-analyzer-core     │  │
//! │  └─────┬─────┘ ◄──────────── │  normalize → debounce   │  │
//! │        │        Analysis     └───────────┬────────────┘  │
//! │        ▼                                 ▼               │
//! │   HTML / JSON                   ExportStore (temp CSV)   │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use boat_analyzer_core::logic::report::ExportStore;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging (also captures `log` records from the core crate)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "boat_analyzer_server=debug,boat_analyzer_core=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").map_or(false, |f| f == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Boat Analyzer Server starting ({})...", config.environment);
    if !config.is_production() {
        tracing::debug!(?config, "Loaded configuration");
    }
    tracing::info!(
        "Envelope: throttle >= {}%, mixture [{}, {}], fuel [{}, {}] psi, ambient +{} °C, sustained {} s, qualification={}, timestamps={}",
        config.envelope.throttle_activation_min,
        config.envelope.mixture_range.low,
        config.envelope.mixture_range.high,
        config.envelope.fuel_pressure_range.low,
        config.envelope.fuel_pressure_range.high,
        config.envelope.ambient_offset,
        config.envelope.sustained_violation_threshold,
        config.envelope.qualification_policy.as_str(),
        config.envelope.timestamp_policy.as_str(),
    );

    let store = ExportStore::from_path(config.export_dir.clone())
        .with_context(|| format!("cannot create export dir {}", config.export_dir.display()))?;
    tracing::info!(
        "Exports: {} (kept {} s)",
        store.base_dir().display(),
        config.export_ttl.as_secs()
    );
    store
        .prune_older_than(config.export_ttl)
        .context("cannot prune expired exports")?;

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        store,
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub store: ExportStore,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    // Browser routes
    let page_routes = Router::new()
        .route("/", get(handlers::upload::index))
        .route("/upload", post(handlers::upload::upload));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/analyses", post(handlers::analyses::create))
        .route("/api/v1/analyses/:id/download", get(handlers::analyses::download));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
