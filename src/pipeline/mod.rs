//! The extract-transform-load pipeline for Spotify listening history.
//!
//! [`run`] wires the three stages together: pull recently played tracks
//! (plus artist metadata and audio features) from the Web API, clean and
//! deduplicate them, then upsert everything into PostgreSQL in a single
//! transaction.

pub mod extract;
pub mod load;
pub mod transform;

use std::{
    fmt,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use sqlx::PgPool;

use crate::{
    db,
    error::Result,
    info,
    pipeline::{load::LoadReport, transform::TransformReport},
    spotify::auth::TokenManager,
    warning,
};

/// How far back a run reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Fetch everything the recently-played endpoint still exposes.
    Full,
    /// Fetch only plays newer than the latest `played_at` already stored.
    Incremental,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Full => write!(f, "full"),
            RunMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Everything a finished run has to report.
#[derive(Debug)]
pub struct RunSummary {
    pub mode: RunMode,
    pub watermark: Option<DateTime<Utc>>,
    pub extracted_plays: usize,
    pub transform: TransformReport,
    pub load: LoadReport,
    pub duration: Duration,
}

/// Executes one pipeline run end to end.
///
/// In incremental mode the watermark comes from `listening_history`; a run
/// against an empty table behaves exactly like a full run. An empty extract
/// short-circuits before touching the database.
///
/// # Arguments
/// * `pool` - Open connection pool against the target database.
/// * `mode` - Full or incremental reach.
/// * `limit` - Maximum plays to request (the API caps this at 50).
///
/// # Returns
/// A [`RunSummary`] with per-stage counts and the total wall-clock time.
pub async fn run(pool: &PgPool, mode: RunMode, limit: u32) -> Result<RunSummary> {
    let started = Instant::now();

    let watermark = match mode {
        RunMode::Incremental => db::latest_played_at(pool).await?,
        RunMode::Full => None,
    };

    match watermark {
        Some(ts) => info!("Fetching plays after {}.", ts.to_rfc3339()),
        None => info!("No watermark found; fetching the full recent history."),
    }

    let mut token_mgr = TokenManager::new();
    let raw = extract::extract(&mut token_mgr, limit, watermark).await?;
    let extracted_plays = raw.plays.len();

    if extracted_plays == 0 {
        info!("No new plays; nothing to load.");
        return Ok(RunSummary {
            mode,
            watermark,
            extracted_plays,
            transform: TransformReport::default(),
            load: LoadReport::default(),
            duration: started.elapsed(),
        });
    }

    info!(
        "Extracted {} plays, {} artists, {} audio features.",
        extracted_plays,
        raw.artists.len(),
        raw.features.len()
    );

    let (data, transform) = transform::transform(raw);
    if transform.dropped_bad_timestamp > 0 {
        warning!(
            "Dropped {} plays with unparseable timestamps.",
            transform.dropped_bad_timestamp
        );
    }
    if transform.dropped_no_artist > 0 {
        warning!(
            "Dropped {} plays without any credited artist.",
            transform.dropped_no_artist
        );
    }

    let load = load::load(pool, &data).await?;

    Ok(RunSummary {
        mode,
        watermark,
        extracted_plays,
        transform,
        load,
        duration: started.elapsed(),
    })
}
