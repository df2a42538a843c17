use tabled::Table;

use crate::{db, error, success, types::QualityCheckRow, warning};

/// Runs the post-load data-quality checks and prints them as a table.
///
/// Duplicate listening events fail the check; partial genre or
/// audio-feature coverage is expected (the API doesn't have them for every
/// artist or track) and only reported.
pub async fn quality() {
    let pool = match db::connect().await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot connect to database: {}", e),
    };

    let report = match db::stats::quality_report(&pool).await {
        Ok(report) => report,
        Err(e) => error!("Failed to run quality checks: {}", e),
    };

    let rows = vec![
        QualityCheckRow {
            check: "artists with genres".to_string(),
            result: format!("{}/{}", report.artists_with_genres, report.total_artists),
        },
        QualityCheckRow {
            check: "tracks without audio features".to_string(),
            result: format!("{}/{}", report.tracks_without_features, report.total_tracks),
        },
        QualityCheckRow {
            check: "listening events".to_string(),
            result: report.total_events.to_string(),
        },
        QualityCheckRow {
            check: "duplicate (track, played_at) pairs".to_string(),
            result: report.duplicate_events.to_string(),
        },
        QualityCheckRow {
            check: "orphaned listening events".to_string(),
            result: report.orphaned_events.to_string(),
        },
    ];

    println!("{}", Table::new(rows));

    if report.is_clean() {
        success!("All quality checks passed.");
    } else {
        warning!(
            "Found {} duplicated and {} orphaned listening events.",
            report.duplicate_events,
            report.orphaned_events
        );
    }
}
