use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::{self, auth::TokenManager},
    types::{AudioFeaturesObject, SeveralAudioFeaturesResponse},
};

/// The several-audio-features endpoint accepts at most 100 ids per request.
const MAX_IDS_PER_REQUEST: usize = 100;

/// Retrieves audio features (danceability, energy, tempo, ...) for a set of
/// tracks, batching up to 100 ids per request.
///
/// Tracks without computed features come back as null slots and are skipped;
/// audio features are optional per track throughout the pipeline.
pub async fn get_several_audio_features(
    token_mgr: &mut TokenManager,
    track_ids: &[String],
) -> Result<Vec<AudioFeaturesObject>> {
    let client = Client::new();
    let mut features = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(MAX_IDS_PER_REQUEST) {
        let api_url = format!(
            "{url}/audio-features?ids={ids}",
            url = &config::spotify_apiurl(),
            ids = chunk.join(",")
        );

        let token = token_mgr.get_valid_token().await?;
        let response = spotify::get_with_retry(&client, &api_url, &token).await?;
        let json = response.json::<SeveralAudioFeaturesResponse>().await?;
        features.extend(json.audio_features.into_iter().flatten());
    }

    Ok(features)
}
