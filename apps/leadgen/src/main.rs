mod config;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod routes;
mod search_client;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pipeline::providers::HttpProviders;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting leadgen v{}", env!("CARGO_PKG_VERSION"));

    // Keys may still arrive per request, so a missing one is only a warning here.
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; clients must supply openai_api_key");
    }
    if config.bright_data_api_key.is_none() {
        warn!("BRIGHT_DATA_API_KEY is not set; clients must supply bright_data_api_key");
    }
    info!(
        "LLM model: {}, lead search: {} (country {}), max attempts: {}",
        config.openai_model, config.search_url, config.search_country, config.max_attempts
    );

    let state = AppState {
        providers: Arc::new(HttpProviders::from_config(&config)),
        sessions: SessionStore::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
