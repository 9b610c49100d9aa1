mod config;
mod digest;
mod errors;
mod latex;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
mod tailoring;
mod transcode;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, LlmRegistry, DEFAULT_PROVIDER};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::FsDocumentStore;
use crate::tailoring::LlmSectionTailor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store, seeding the base version on first run
    let store = Arc::new(FsDocumentStore::open(&config.data_dir)?);
    info!("Document store ready at {}", config.data_dir);

    // Build the LLM registry and the tailoring collaborator on top of it
    let mut registry = LlmRegistry::new();
    registry.register(
        DEFAULT_PROVIDER,
        LlmClient::new(config.anthropic_api_key.clone()),
    );
    let tailor = Arc::new(LlmSectionTailor::new(&registry, DEFAULT_PROVIDER)?);
    info!("Tailoring client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        store,
        tailor,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
