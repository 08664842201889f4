//! Sequence counter persistence operations.
//!
//! The `counters` table holds one row per named counter. The increment
//! is a single upsert statement, so Postgres guarantees that concurrent
//! callers for the same name observe distinct consecutive values — no
//! read-modify-write window exists.

use sqlx::PgPool;

/// Atomically increment the named counter (creating it at 0 first if
/// absent) and return the post-increment value.
pub async fn next_sequence(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
    let (seq,): (i64,) = sqlx::query_as(
        "INSERT INTO counters (name, seq) VALUES ($1, 1)
         ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1
         RETURNING seq",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(seq)
}

/// Load all counter values for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (String, i64)>("SELECT name, seq FROM counters")
        .fetch_all(pool)
        .await
}
