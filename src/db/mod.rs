//! PostgreSQL access: connection pool, schema setup, and reporting queries.

pub mod schema;
pub mod stats;

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{config, error::Result};

/// Opens a connection pool against the configured `DATABASE_URL` and
/// verifies connectivity with a trivial query, so that an unreachable
/// database fails the run immediately instead of at first load.
pub async fn connect() -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config::database_url())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Returns the incremental-load watermark: the latest `played_at` stored in
/// `listening_history`, or `None` when the table is empty (first run).
pub async fn latest_played_at(pool: &PgPool) -> Result<Option<DateTime<Utc>>> {
    let watermark: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT MAX(played_at) FROM listening_history")
            .fetch_one(pool)
            .await?;

    Ok(watermark)
}
