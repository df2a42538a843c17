use spotetl::{
    pipeline::{extract::RawData, transform::transform},
    types::{
        AlbumObject, ArtistObject, ArtistRef, AudioFeaturesObject, Followers, PlayHistoryItem,
        TrackObject,
    },
    utils,
};

fn artist_ref(id: &str, name: &str) -> ArtistRef {
    ArtistRef {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn play(track_id: &str, played_at: &str) -> PlayHistoryItem {
    PlayHistoryItem {
        played_at: played_at.to_string(),
        track: TrackObject {
            id: track_id.to_string(),
            name: format!("Track {}", track_id),
            duration_ms: 180_000,
            explicit: false,
            popularity: Some(50),
            preview_url: None,
            artists: vec![artist_ref("artist-1", "Artist One")],
            album: AlbumObject {
                id: "album-1".to_string(),
                name: "Album One".to_string(),
                release_date: "2020-05-15".to_string(),
                release_date_precision: "day".to_string(),
                album_type: Some("album".to_string()),
                total_tracks: Some(12),
                artists: vec![artist_ref("artist-1", "Artist One")],
            },
        },
    }
}

fn artist_detail(id: &str, name: &str, genres: &[&str]) -> ArtistObject {
    ArtistObject {
        id: id.to_string(),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        popularity: Some(70),
        followers: Some(Followers { total: 1_000_000 }),
    }
}

fn features(track_id: &str) -> AudioFeaturesObject {
    AudioFeaturesObject {
        id: track_id.to_string(),
        danceability: 0.65,
        energy: 0.8,
        key: 5,
        loudness: -6.5,
        mode: 1,
        speechiness: 0.04,
        acousticness: 0.1,
        instrumentalness: 0.0,
        liveness: 0.12,
        valence: 0.5,
        tempo: 120.0,
        time_signature: 4,
    }
}

#[test]
fn test_duplicate_plays_collapse_to_one_event() {
    let raw = RawData {
        plays: vec![
            play("track-1", "2024-03-01T10:00:00Z"),
            play("track-1", "2024-03-01T10:00:00Z"),
            play("track-1", "2024-03-01T10:05:00Z"),
        ],
        artists: vec![artist_detail("artist-1", "Artist One", &["rock"])],
        features: vec![features("track-1")],
    };

    let (data, report) = transform(raw);

    assert_eq!(data.events.len(), 2);
    assert_eq!(report.duplicate_plays, 1);
    assert_eq!(data.tracks.len(), 1);
    assert_eq!(data.albums.len(), 1);
    assert_eq!(data.artists.len(), 1);
}

#[test]
fn test_unparseable_timestamps_are_dropped() {
    let raw = RawData {
        plays: vec![
            play("track-1", "2024-03-01T10:00:00Z"),
            play("track-2", "not-a-timestamp"),
        ],
        artists: vec![],
        features: vec![],
    };

    let (data, report) = transform(raw);

    assert_eq!(data.events.len(), 1);
    assert_eq!(report.dropped_bad_timestamp, 1);
    // the dropped play's track never makes it into the dimension tables
    assert_eq!(data.tracks.len(), 1);
    assert_eq!(data.tracks[0].id, "track-1");
}

#[test]
fn test_plays_without_artists_are_dropped() {
    let mut bad = play("track-1", "2024-03-01T10:00:00Z");
    bad.track.artists.clear();

    let (data, report) = transform(RawData {
        plays: vec![bad],
        artists: vec![],
        features: vec![],
    });

    assert!(data.events.is_empty());
    assert!(data.tracks.is_empty());
    assert_eq!(report.dropped_no_artist, 1);
}

#[test]
fn test_artist_detail_enriches_record() {
    let raw = RawData {
        plays: vec![play("track-1", "2024-03-01T10:00:00Z")],
        artists: vec![artist_detail("artist-1", "Artist One", &["rock", "pop"])],
        features: vec![],
    };

    let (data, _) = transform(raw);

    let artist = &data.artists[0];
    assert_eq!(artist.genres, vec!["rock", "pop"]);
    assert_eq!(artist.popularity, Some(70));
    assert_eq!(artist.followers, Some(1_000_000));
}

#[test]
fn test_missing_artist_detail_falls_back_to_inline_reference() {
    let raw = RawData {
        plays: vec![play("track-1", "2024-03-01T10:00:00Z")],
        artists: vec![],
        features: vec![],
    };

    let (data, _) = transform(raw);

    let artist = &data.artists[0];
    assert_eq!(artist.id, "artist-1");
    assert_eq!(artist.name, "Artist One");
    assert!(artist.genres.is_empty());
    assert_eq!(artist.popularity, None);
    assert_eq!(artist.followers, None);
}

#[test]
fn test_empty_track_name_gets_placeholder() {
    let mut item = play("track-1", "2024-03-01T10:00:00Z");
    item.track.name = "   ".to_string();

    let (data, _) = transform(RawData {
        plays: vec![item],
        artists: vec![],
        features: vec![],
    });

    assert_eq!(data.tracks[0].name, "Unknown Track");
}

#[test]
fn test_release_date_parsed_by_precision() {
    let mut item = play("track-1", "2024-03-01T10:00:00Z");
    item.track.album.release_date = "1999".to_string();
    item.track.album.release_date_precision = "year".to_string();

    let (data, _) = transform(RawData {
        plays: vec![item],
        artists: vec![],
        features: vec![],
    });

    let release = data.albums[0].release_date.unwrap();
    assert_eq!(release, chrono::NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
}

#[test]
fn test_features_clamped_and_limited_to_kept_tracks() {
    let mut out_of_range = features("track-1");
    out_of_range.danceability = 1.5;
    out_of_range.loudness = -75.0;
    out_of_range.tempo = 320.0;

    let raw = RawData {
        plays: vec![play("track-1", "2024-03-01T10:00:00Z")],
        artists: vec![],
        // track-2 was never played, so its features must be discarded
        features: vec![out_of_range, features("track-2")],
    };

    let (data, _) = transform(raw);

    assert_eq!(data.features.len(), 1);
    let f = &data.features[0];
    assert_eq!(f.track_id, "track-1");
    assert_eq!(f.danceability, 1.0);
    assert_eq!(f.loudness, -60.0);
    assert_eq!(f.tempo, 300.0);
}

#[test]
fn test_long_names_truncated() {
    let mut item = play("track-1", "2024-03-01T10:00:00Z");
    item.track.name = "t".repeat(400);
    item.track.album.name = "a".repeat(400);

    let (data, _) = transform(RawData {
        plays: vec![item],
        artists: vec![],
        features: vec![],
    });

    assert_eq!(
        data.tracks[0].name.chars().count(),
        utils::MAX_TRACK_NAME_LEN
    );
    assert_eq!(data.albums[0].name.chars().count(), utils::MAX_NAME_LEN);
}
