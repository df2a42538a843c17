//! Reporting queries behind `spotetl status` and `spotetl quality`.

use sqlx::PgPool;

use crate::error::Result;

/// Tables reported by `spotetl status`, in load order.
pub const TABLES: [&str; 5] = [
    "artists",
    "albums",
    "tracks",
    "audio_features",
    "listening_history",
];

/// Returns `(table, row_count)` for every pipeline table.
pub async fn table_counts(pool: &PgPool) -> Result<Vec<(String, i64)>> {
    let mut counts = Vec::with_capacity(TABLES.len());

    for table in TABLES {
        // table names come from the fixed list above, not user input
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;
        counts.push((table.to_string(), count));
    }

    Ok(counts)
}

/// Outcome of the data-quality checks over the loaded schema.
#[derive(Debug)]
pub struct QualityReport {
    pub total_artists: i64,
    pub artists_with_genres: i64,
    pub total_tracks: i64,
    pub tracks_without_features: i64,
    pub total_events: i64,
    pub duplicate_events: i64,
    pub orphaned_events: i64,
}

impl QualityReport {
    /// Duplicated listening events would mean the (track_id, played_at)
    /// dedup contract is broken somewhere; orphaned events would mean a
    /// play was loaded without its track dimension.
    pub fn is_clean(&self) -> bool {
        self.duplicate_events == 0 && self.orphaned_events == 0
    }
}

/// Runs the data-quality checks: genre coverage on artists, audio-feature
/// coverage on tracks, duplicate (track_id, played_at) pairs, and listening
/// events without a matching track (both always 0 while the unique and
/// foreign-key constraints stand).
pub async fn quality_report(pool: &PgPool) -> Result<QualityReport> {
    let total_artists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;

    let artists_with_genres: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM artists WHERE genres IS NOT NULL AND cardinality(genres) > 0",
    )
    .fetch_one(pool)
    .await?;

    let total_tracks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await?;

    let tracks_without_features: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM tracks t
        LEFT JOIN audio_features f ON f.track_id = t.track_id
        WHERE f.track_id IS NULL
        "#,
    )
    .fetch_one(pool)
    .await?;

    let total_events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listening_history")
        .fetch_one(pool)
        .await?;

    let duplicate_events: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM (
            SELECT track_id, played_at
            FROM listening_history
            GROUP BY track_id, played_at
            HAVING COUNT(*) > 1
        ) dupes
        "#,
    )
    .fetch_one(pool)
    .await?;

    let orphaned_events: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM listening_history h
        LEFT JOIN tracks t ON t.track_id = h.track_id
        WHERE t.track_id IS NULL
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(QualityReport {
        total_artists,
        artists_with_genres,
        total_tracks,
        tracks_without_features,
        total_events,
        duplicate_events,
        orphaned_events,
    })
}
