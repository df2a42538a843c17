use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::{self, auth::TokenManager},
    types::{ArtistObject, SeveralArtistsResponse},
};

/// The several-artists endpoint accepts at most 50 ids per request.
const MAX_IDS_PER_REQUEST: usize = 50;

/// Retrieves detailed metadata (genres, popularity, follower counts) for a
/// set of artists, batching up to 50 ids per request.
///
/// Unknown ids come back as null slots in the response and are silently
/// skipped; callers must not assume every requested id is present in the
/// result.
pub async fn get_several_artists(
    token_mgr: &mut TokenManager,
    artist_ids: &[String],
) -> Result<Vec<ArtistObject>> {
    let client = Client::new();
    let mut artists = Vec::with_capacity(artist_ids.len());

    for chunk in artist_ids.chunks(MAX_IDS_PER_REQUEST) {
        let api_url = format!(
            "{url}/artists?ids={ids}",
            url = &config::spotify_apiurl(),
            ids = chunk.join(",")
        );

        let token = token_mgr.get_valid_token().await?;
        let response = spotify::get_with_retry(&client, &api_url, &token).await?;
        let json = response.json::<SeveralArtistsResponse>().await?;
        artists.extend(json.artists.into_iter().flatten());
    }

    Ok(artists)
}
