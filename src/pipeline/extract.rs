use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    error::Result,
    spotify::{artists, auth::TokenManager, features, player},
    types::{ArtistObject, AudioFeaturesObject, PlayHistoryItem},
    utils,
};

/// Raw API payloads gathered by the extract stage, before any cleaning.
#[derive(Debug, Clone, Default)]
pub struct RawData {
    pub plays: Vec<PlayHistoryItem>,
    pub artists: Vec<ArtistObject>,
    pub features: Vec<AudioFeaturesObject>,
}

/// Pulls recently played tracks plus the artist metadata and audio features
/// referenced by them.
///
/// When `after` is set (incremental mode) only plays strictly newer than the
/// watermark are requested. The artist and feature lookups are driven by the
/// unique ids appearing in the fetched plays, so an empty pull makes no
/// further API calls.
pub async fn extract(
    token_mgr: &mut TokenManager,
    limit: u32,
    after: Option<DateTime<Utc>>,
) -> Result<RawData> {
    let after_ms = after.map(utils::watermark_to_after);
    let plays = player::recently_played(token_mgr, limit, after_ms).await?;

    if plays.is_empty() {
        return Ok(RawData::default());
    }

    let mut artist_ids: BTreeSet<String> = BTreeSet::new();
    let mut track_ids: BTreeSet<String> = BTreeSet::new();
    for item in &plays {
        track_ids.insert(item.track.id.clone());
        // the owning artist is the first credited one, both on the track and
        // on its album
        if let Some(artist) = item.track.artists.first() {
            artist_ids.insert(artist.id.clone());
        }
        if let Some(artist) = item.track.album.artists.first() {
            artist_ids.insert(artist.id.clone());
        }
    }

    let artist_ids: Vec<String> = artist_ids.into_iter().collect();
    let track_ids: Vec<String> = track_ids.into_iter().collect();

    let artists = artists::get_several_artists(token_mgr, &artist_ids).await?;
    let features = features::get_several_audio_features(token_mgr, &track_ids).await?;

    Ok(RawData {
        plays,
        artists,
        features,
    })
}
