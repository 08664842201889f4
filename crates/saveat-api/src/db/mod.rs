//! # Database Persistence Layer
//!
//! Postgres persistence via SQLx for the three collections: admins,
//! products, counters.
//!
//! ## Architecture
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, every
//! store mutation is written through to Postgres and the in-memory
//! stores are hydrated from it at startup. When absent, the API operates
//! in in-memory-only mode (suitable for development and testing).
//!
//! A configured-but-unreachable database is a startup error, which the
//! binary treats as fatal.

pub mod admins;
pub mod counters;
pub mod products;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::state::AppState;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no connection string is configured (in-memory-only
/// mode). Returns `Err` if the URL is set but the connection or a
/// migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Load all persisted rows into the in-memory stores on startup.
pub async fn hydrate(state: &AppState, pool: &PgPool) -> Result<(), sqlx::Error> {
    state.admins.load(admins::load_all(pool).await?);
    state.products.load(products::load_all(pool).await?);
    state.counters.load(counters::load_all(pool).await?);
    tracing::info!(
        admins = state.admins.len(),
        products = state.products.len(),
        "Stores hydrated from database"
    );
    Ok(())
}
