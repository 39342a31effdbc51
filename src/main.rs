use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use compass_api::api::{create_router, AppState};
use compass_api::config::Config;
use compass_api::db::{self, Cache};
use compass_api::store::PgCourseStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    let redis_client = db::create_redis_client(&config.redis_url)?;

    let store = Arc::new(PgCourseStore::new(pool));
    let state = AppState::new(store, Some(Cache::new(redis_client)));

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "compass-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
