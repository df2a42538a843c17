//! Integration tests against a live PostgreSQL instance.
//!
//! These are ignored by default; run them with a throwaway database:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/spotetl_test cargo test -- --ignored
//! ```

use chrono::{TimeZone, Utc};
use spotetl::{
    db,
    error::Error,
    pipeline::load::load,
    types::{
        AlbumRecord, ArtistRecord, Dataset, ListeningEvent, TrackRecord,
    },
};

fn sample_dataset() -> Dataset {
    Dataset {
        artists: vec![ArtistRecord {
            id: "it-artist-1".to_string(),
            name: "Integration Artist".to_string(),
            genres: vec!["test rock".to_string()],
            popularity: Some(42),
            followers: Some(1234),
        }],
        albums: vec![AlbumRecord {
            id: "it-album-1".to_string(),
            name: "Integration Album".to_string(),
            artist_id: "it-artist-1".to_string(),
            release_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
            total_tracks: Some(10),
            album_type: Some("album".to_string()),
        }],
        tracks: vec![TrackRecord {
            id: "it-track-1".to_string(),
            name: "Integration Track".to_string(),
            album_id: "it-album-1".to_string(),
            artist_id: "it-artist-1".to_string(),
            duration_ms: 200_000,
            explicit: false,
            popularity: Some(33),
            preview_url: None,
        }],
        features: vec![],
        events: vec![ListeningEvent {
            track_id: "it-track-1".to_string(),
            played_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }],
    }
}

#[tokio::test]
#[ignore]
async fn test_load_is_idempotent() {
    spotetl::config::load_env().await;
    let pool = db::connect().await.expect("database must be reachable");
    db::schema::create_tables(&pool)
        .await
        .expect("schema setup failed");

    let data = sample_dataset();

    let first = load(&pool, &data).await.expect("first load failed");
    assert_eq!(first.listening_history, 1);

    // replaying the same batch upserts dimensions but inserts no new events
    let second = load(&pool, &data).await.expect("second load failed");
    assert_eq!(second.listening_history, 0);

    let watermark = db::latest_played_at(&pool)
        .await
        .expect("watermark query failed")
        .expect("watermark must exist after load");
    assert_eq!(
        watermark,
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    );
}

#[tokio::test]
#[ignore]
async fn test_dangling_foreign_key_is_a_data_quality_error() {
    spotetl::config::load_env().await;
    let pool = db::connect().await.expect("database must be reachable");
    db::schema::create_tables(&pool)
        .await
        .expect("schema setup failed");

    let mut data = sample_dataset();
    // track references an album that is never loaded
    data.albums.clear();
    data.tracks[0].album_id = "it-missing-album".to_string();

    let err = load(&pool, &data).await.expect_err("load must fail");
    assert!(matches!(err, Error::DataQuality(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore]
async fn test_quality_report_on_loaded_data() {
    spotetl::config::load_env().await;
    let pool = db::connect().await.expect("database must be reachable");
    db::schema::create_tables(&pool)
        .await
        .expect("schema setup failed");

    load(&pool, &sample_dataset()).await.expect("load failed");

    let report = db::stats::quality_report(&pool)
        .await
        .expect("quality checks failed");
    assert!(report.is_clean());
    assert_eq!(report.duplicate_events, 0);
    assert_eq!(report.orphaned_events, 0);
    assert!(report.total_artists >= 1);
    assert!(report.total_events >= 1);
}
