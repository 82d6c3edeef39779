mod auth;
mod config;
mod documents;
mod enhance;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::SupabaseAuth;
use crate::config::Config;
use crate::documents::store::PgDocumentStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: a missing required variable stops startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL-backed document store
    let documents = Arc::new(PgDocumentStore::connect(&config.database_url).await?);

    // Initialize identity provider
    let identity = Arc::new(SupabaseAuth::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));
    info!("Identity provider: {}", config.supabase_url);

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_base_url.clone());
    if llm.has_credential() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!(
            "{} is not set; enhancement requests will fail until it is",
            llm_client::API_KEY_VAR
        );
    }

    let state = AppState {
        llm,
        documents,
        identity,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
