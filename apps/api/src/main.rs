//! # vitae-api
//!
//! Resume rendering service. Candidates live in Postgres; a render request
//! pulls the candidate's profile, generates an opening summary, lays the
//! document out page by page, and returns the finished PDF.

mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod summary;

use anyhow::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::RenderTheme;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.rust_log.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = db::create_pool(&config.database_url, config.db_max_connections).await?;

    let llm = LlmClient::new(config.anthropic_api_key.clone());

    let state = AppState {
        db,
        llm,
        config: config.clone(),
        theme: RenderTheme::default(),
    };

    let app = routes::build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("vitae-api listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
