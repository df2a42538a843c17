use crate::{db, error, success};

/// Creates the PostgreSQL schema for the pipeline.
///
/// All statements are idempotent, so running `spotetl init` against an
/// already initialized database is a no-op.
pub async fn init() {
    let pool = match db::connect().await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot connect to database: {}", e),
    };

    match db::schema::create_tables(&pool).await {
        Ok(()) => success!("Database schema is ready."),
        Err(e) => error!("Failed to create schema: {}", e),
    }
}
