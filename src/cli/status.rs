use tabled::Table;

use crate::{db, error, info, types::TableCountRow};

/// Prints row counts for every pipeline table plus the incremental
/// watermark, the latest `played_at` the next incremental run will resume
/// from.
pub async fn status() {
    let pool = match db::connect().await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot connect to database: {}", e),
    };

    let counts = match db::stats::table_counts(&pool).await {
        Ok(counts) => counts,
        Err(e) => error!("Failed to read table counts: {}", e),
    };

    let rows: Vec<TableCountRow> = counts
        .into_iter()
        .map(|(table, count)| TableCountRow { table, rows: count })
        .collect();

    println!("{}", Table::new(rows));

    match db::latest_played_at(&pool).await {
        Ok(Some(watermark)) => info!("Watermark (latest played_at): {}", watermark.to_rfc3339()),
        Ok(None) => info!("No listening events loaded yet."),
        Err(e) => error!("Failed to read watermark: {}", e),
    }
}
