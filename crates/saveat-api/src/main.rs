//! Saveat API server binary.

use tracing_subscriber::EnvFilter;

use saveat_api::{app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env()?;

    let pool = saveat_api::db::init_pool(config.database_url.as_deref()).await?;

    let state = AppState::with_config(config.clone(), pool.clone());
    if let Some(pool) = &pool {
        saveat_api::db::hydrate(&state, pool).await?;
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "saveat-api listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
