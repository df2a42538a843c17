use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::{self, auth::TokenManager},
    types::{PlayHistoryItem, RecentlyPlayedResponse},
};

/// The recently-played endpoint caps `limit` at 50 items per request.
pub const MAX_RECENTLY_PLAYED: u32 = 50;

/// Retrieves the user's recently played tracks from the Spotify Web API.
///
/// # Arguments
///
/// * `token_mgr` - Token manager providing a valid access token
/// * `limit` - Maximum number of plays to return (capped at 50 by the API)
/// * `after` - Optional exclusive cursor in Unix epoch milliseconds; only
///   plays strictly after this instant are returned. This is how incremental
///   pulls bound the fetch to events past the stored watermark.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<PlayHistoryItem>)` - Plays with full track and album metadata
/// - `Err(Error)` - Network error, API error, or authentication failure
///
/// # API Endpoint
///
/// Uses Spotify's `/me/player/recently-played` endpoint. Note that the API
/// only retains a window of roughly the last 50 plays, so a single request
/// covers everything retrievable; there is no deeper pagination to walk.
pub async fn recently_played(
    token_mgr: &mut TokenManager,
    limit: u32,
    after: Option<i64>,
) -> Result<Vec<PlayHistoryItem>> {
    let mut api_url = format!(
        "{uri}/me/player/recently-played?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = limit.min(MAX_RECENTLY_PLAYED)
    );
    if let Some(after) = after {
        api_url.push_str(&format!("&after={}", after));
    }

    let client = Client::new();
    let token = token_mgr.get_valid_token().await?;
    let response = spotify::get_with_retry(&client, &api_url, &token).await?;
    let json = response.json::<RecentlyPlayedResponse>().await?;

    Ok(json.items)
}
