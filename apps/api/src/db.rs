use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Opens the connection pool for the candidate store. Pool size is
/// configurable through `DB_MAX_CONNECTIONS`; renders hold a connection only
/// for the two lookups at the start of the pipeline.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "candidate store pool ready");
    Ok(pool)
}
