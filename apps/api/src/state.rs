use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::RenderTheme;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Layout theme: page geometry, fonts, colors, and spacing for the
    /// render engine. One value per process; renders clone it.
    pub theme: RenderTheme,
}
