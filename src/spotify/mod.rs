//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API endpoints the
//! pipeline extracts from, handling HTTP communication, token refresh, error
//! handling, and rate limiting.
//!
//! ## Core Modules
//!
//! - [`auth`] - Access-token management via the OAuth 2.0 refresh-token grant.
//!   The interactive authorization flow that produces the refresh token is an
//!   external concern; the pipeline only mints short-lived access tokens from
//!   credentials supplied through the environment.
//! - [`player`] - The recently-played listening history endpoint, including
//!   the `after` cursor used for incremental pulls.
//! - [`artists`] - Batch artist metadata (genres, popularity, followers),
//!   up to 50 ids per request.
//! - [`features`] - Batch audio features, up to 100 ids per request.
//!
//! ## Error Handling
//!
//! All requests go through [`get_with_retry`], which implements the retry
//! policy for transient API errors:
//!
//! - **429 Too Many Requests**: honors the `Retry-After` header, sleeping and
//!   retrying for delays up to 120 seconds; longer delays produce a warning
//!   and the error is propagated.
//! - **502 Bad Gateway**: retried after a 10-second delay.
//! - Everything else is propagated to the caller immediately; the external
//!   scheduler owns retries beyond this point.

pub mod artists;
pub mod auth;
pub mod features;
pub mod player;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    utils, warning,
};

/// Performs an authenticated GET against the Spotify Web API, retrying
/// rate-limit (429) and bad-gateway (502) responses as described in the
/// module documentation. Any other non-success status is returned as an
/// [`Error::Api`], after surfacing the message from the API's error body
/// when it carries one.
pub(crate) async fn get_with_retry(client: &Client, url: &str, token: &str) -> Result<Response> {
    loop {
        let response = client.get(url).bearer_auth(token).send().await?;

        // check for retry-after header
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = utils::parse_retry_after(
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok()),
            );
            if retry_after <= 120 {
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            warning!(
                "Retry-After has reached an abnormal high of {} seconds. Try your best tomorrow again.",
                retry_after
            );
        }

        if let Err(err) = response.error_for_status_ref() {
            if err.status() == Some(StatusCode::BAD_GATEWAY) {
                sleep(Duration::from_secs(10)).await;
                continue; // retry
            }

            let body = response.text().await.unwrap_or_default();
            if let Some(message) = utils::api_error_message(&body) {
                warning!("Spotify API reported: {}", message);
            }
            return Err(Error::Api(err)); // propagate other errors
        }

        return Ok(response);
    }
}
