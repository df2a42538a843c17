use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    db, error, info,
    pipeline::{self, RunMode},
    success,
};

/// Executes one ETL run and prints the per-stage breakdown.
///
/// Any stage failure ends the process with exit code 1 so the scheduler
/// sees the task as failed; partial loads are impossible because the load
/// stage is a single transaction.
pub async fn run(mode: RunMode, limit: u32) {
    let pool = match db::connect().await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot connect to database: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Running {} pipeline...", mode));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let summary = match pipeline::run(&pool, mode, limit).await {
        Ok(summary) => {
            pb.finish_and_clear();
            summary
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Pipeline run failed: {}", e);
        }
    };

    success!(
        "Pipeline run ({}) finished in {:.2}s.",
        summary.mode,
        summary.duration.as_secs_f64()
    );
    info!(
        "Plays extracted: {}, events kept: {}, duplicates skipped: {}.",
        summary.extracted_plays, summary.transform.events, summary.transform.duplicate_plays
    );
    info!(
        "Rows written - artists: {}, albums: {}, tracks: {}, audio features: {}, new listening events: {}.",
        summary.load.artists,
        summary.load.albums,
        summary.load.tracks,
        summary.load.audio_features,
        summary.load.listening_history
    );
}
