//! Transform stage: raw API payloads become clean, deduplicated records
//! ready for loading.
//!
//! All cleaning rules live here or in [`crate::utils`]: text normalization,
//! release-date parsing by precision, audio-feature clamping, and the
//! (track_id, played_at) dedup that keeps the fact table append-safe.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::{
    pipeline::extract::RawData,
    types::{
        AlbumRecord, ArtistObject, ArtistRecord, ArtistRef, AudioFeaturesRecord, Dataset,
        ListeningEvent, TrackRecord,
    },
    utils,
};

/// Per-run accounting for the transform stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformReport {
    pub input_plays: usize,
    pub events: usize,
    pub duplicate_plays: usize,
    pub dropped_bad_timestamp: usize,
    pub dropped_no_artist: usize,
}

/// Turns the raw extract into a [`Dataset`] of unique, cleaned records.
///
/// Plays with an unparseable `played_at` or without any credited artist are
/// dropped (and counted); everything else is kept, falling back to
/// placeholder names where the API returned empty strings so NOT NULL
/// columns always load.
pub fn transform(raw: RawData) -> (Dataset, TransformReport) {
    let mut report = TransformReport {
        input_plays: raw.plays.len(),
        ..Default::default()
    };

    let details: HashMap<String, ArtistObject> = raw
        .artists
        .into_iter()
        .map(|artist| (artist.id.clone(), artist))
        .collect();

    let mut data = Dataset::default();
    let mut seen_artists: HashSet<String> = HashSet::new();
    let mut seen_albums: HashSet<String> = HashSet::new();
    let mut seen_tracks: HashSet<String> = HashSet::new();
    let mut seen_events: HashSet<(String, DateTime<Utc>)> = HashSet::new();

    for item in raw.plays {
        let Some(played_at) = utils::parse_played_at(&item.played_at) else {
            report.dropped_bad_timestamp += 1;
            continue;
        };

        let track = item.track;
        let Some(artist_ref) = track.artists.first() else {
            report.dropped_no_artist += 1;
            continue;
        };

        if seen_events.insert((track.id.clone(), played_at)) {
            data.events.push(ListeningEvent {
                track_id: track.id.clone(),
                played_at,
            });
        } else {
            report.duplicate_plays += 1;
        }

        let album = &track.album;
        // albums credited to "Various Artists" style compilations sometimes
        // carry no artist of their own; fall back to the track's artist
        let album_artist = album.artists.first().unwrap_or(artist_ref);

        push_artist(&mut data.artists, &mut seen_artists, &details, artist_ref);
        push_artist(&mut data.artists, &mut seen_artists, &details, album_artist);

        if seen_albums.insert(album.id.clone()) {
            data.albums.push(AlbumRecord {
                id: album.id.clone(),
                name: utils::clean_text(&album.name, utils::MAX_NAME_LEN)
                    .unwrap_or_else(|| "Unknown Album".to_string()),
                artist_id: album_artist.id.clone(),
                release_date: utils::parse_release_date(
                    &album.release_date,
                    &album.release_date_precision,
                ),
                total_tracks: album.total_tracks,
                album_type: album.album_type.clone(),
            });
        }

        if seen_tracks.insert(track.id.clone()) {
            data.tracks.push(TrackRecord {
                id: track.id.clone(),
                name: utils::clean_text(&track.name, utils::MAX_TRACK_NAME_LEN)
                    .unwrap_or_else(|| "Unknown Track".to_string()),
                album_id: album.id.clone(),
                artist_id: artist_ref.id.clone(),
                duration_ms: track.duration_ms,
                explicit: track.explicit,
                popularity: track.popularity,
                preview_url: track.preview_url.clone(),
            });
        }
    }

    let mut seen_features: HashSet<String> = HashSet::new();
    for f in raw.features {
        // only keep features for tracks that will actually be loaded
        if !seen_tracks.contains(&f.id) || !seen_features.insert(f.id.clone()) {
            continue;
        }
        data.features.push(AudioFeaturesRecord {
            track_id: f.id,
            danceability: utils::clamp_unit(f.danceability),
            energy: utils::clamp_unit(f.energy),
            key: f.key,
            loudness: utils::clamp_loudness(f.loudness),
            mode: f.mode,
            speechiness: utils::clamp_unit(f.speechiness),
            acousticness: utils::clamp_unit(f.acousticness),
            instrumentalness: utils::clamp_unit(f.instrumentalness),
            liveness: utils::clamp_unit(f.liveness),
            valence: utils::clamp_unit(f.valence),
            tempo: utils::clamp_tempo(f.tempo),
            time_signature: f.time_signature,
        });
    }

    report.events = data.events.len();

    (data, report)
}

/// Appends one [`ArtistRecord`] per unique artist id. Uses the full artist
/// object from the several-artists lookup when available, otherwise a
/// minimal record from the inline reference so foreign keys still resolve.
fn push_artist(
    artists: &mut Vec<ArtistRecord>,
    seen: &mut HashSet<String>,
    details: &HashMap<String, ArtistObject>,
    artist_ref: &ArtistRef,
) {
    if !seen.insert(artist_ref.id.clone()) {
        return;
    }

    let record = match details.get(&artist_ref.id) {
        Some(detail) => ArtistRecord {
            id: detail.id.clone(),
            name: utils::clean_text(&detail.name, utils::MAX_NAME_LEN)
                .unwrap_or_else(|| "Unknown Artist".to_string()),
            genres: detail
                .genres
                .iter()
                .filter_map(|g| utils::clean_text(g, utils::MAX_NAME_LEN))
                .collect(),
            popularity: detail.popularity,
            followers: detail.followers.as_ref().map(|f| f.total),
        },
        None => ArtistRecord {
            id: artist_ref.id.clone(),
            name: utils::clean_text(&artist_ref.name, utils::MAX_NAME_LEN)
                .unwrap_or_else(|| "Unknown Artist".to_string()),
            genres: Vec::new(),
            popularity: None,
            followers: None,
        },
    };

    artists.push(record);
}
