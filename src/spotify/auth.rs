use chrono::Utc;
use reqwest::Client;

use crate::{config, error::Result, types::TokenResponse, utils, warning};

/// Seconds before nominal expiry at which a token is considered stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

struct CachedToken {
    access_token: String,
    expires_in: u64,
    obtained_at: u64,
}

/// Mints and caches short-lived access tokens from the configured refresh
/// token. The token lives in memory only; every pipeline run starts cold and
/// performs one refresh-token grant.
pub struct TokenManager {
    token: Option<CachedToken>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager { token: None }
    }

    /// Returns a valid access token, refreshing first when the cached one is
    /// missing or within [`EXPIRY_MARGIN_SECS`] of expiry.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        match &self.token {
            Some(token) if !Self::is_expired(token) => Ok(token.access_token.clone()),
            _ => {
                let token = Self::request_token().await?;
                let access_token = token.access_token.clone();
                self.token = Some(token);
                Ok(access_token)
            }
        }
    }

    fn is_expired(token: &CachedToken) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (token.obtained_at + token.expires_in).saturating_sub(EXPIRY_MARGIN_SECS)
    }

    async fn request_token() -> Result<CachedToken> {
        let refresh_token = config::spotify_refresh_token();
        let client = Client::new();
        let response = client
            .post(config::spotify_token_url())
            .basic_auth(
                config::spotify_client_id(),
                Some(config::spotify_client_secret()),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;

        if let Err(err) = response.error_for_status_ref() {
            let body = response.text().await.unwrap_or_default();
            if let Some(message) = utils::api_error_message(&body) {
                warning!("Token refresh rejected: {}", message);
            }
            return Err(err.into());
        }

        let json: TokenResponse = response.json().await?;

        Ok(CachedToken {
            access_token: json.access_token,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}
