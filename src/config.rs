//! Configuration management for the Spotify ETL pipeline.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Credentials and the database URL
//! are required; API endpoints and batch sizes have sensible defaults.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority, the normal case in containers)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if needed and loads variables from the
/// platform-specific local data directory under `spotetl/.env`. When that
/// file does not exist (e.g. inside a container where everything comes from
/// the environment) a `.env` in the working directory is tried instead, and
/// its absence is not an error.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotetl/.env`
/// - macOS: `~/Library/Application Support/spotetl/.env`
/// - Windows: `%LOCALAPPDATA%/spotetl/.env`
pub async fn load_env() {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotetl/.env");
    if let Some(parent) = path.parent() {
        let _ = async_fs::create_dir_all(parent).await;
    }

    if path.is_file() {
        let _ = dotenv::from_path(path);
    } else {
        let _ = dotenv::dotenv();
    }
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the long-lived refresh token used to mint access tokens.
///
/// The authorization-code flow that produces this token is outside the
/// pipeline; the token is provisioned once and supplied via the environment.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REFRESH_TOKEN` environment variable is not set.
pub fn spotify_refresh_token() -> String {
    env::var("SPOTIFY_REFRESH_TOKEN").expect("SPOTIFY_REFRESH_TOKEN must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Defaults to `https://api.spotify.com/v1` when `SPOTIFY_API_URL` is unset.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the OAuth token endpoint used for refresh-token grants.
///
/// Defaults to `https://accounts.spotify.com/api/token` when
/// `SPOTIFY_TOKEN_URL` is unset.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the PostgreSQL connection URL.
///
/// # Panics
///
/// Panics if the `DATABASE_URL` environment variable is not set.
pub fn database_url() -> String {
    env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Upper bound on rows per INSERT. PostgreSQL allows 65535 bind parameters
/// per statement; the widest insert binds 13 columns, so anything above
/// 5041 rows would fail at runtime.
const MAX_DB_BATCH_SIZE: usize = 5000;

/// Returns the number of rows bound per INSERT statement during loading.
///
/// Read from `DB_BATCH_SIZE`, defaulting to 1000. Invalid values fall back
/// to the default; oversized values are capped at 5000 to stay inside
/// PostgreSQL's bind-parameter limit.
pub fn db_batch_size() -> usize {
    env::var("DB_BATCH_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1000)
        .min(MAX_DB_BATCH_SIZE)
}
