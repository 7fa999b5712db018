//! Configuration management for moodtunes.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! mood policy used by the recommendation pipeline.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::mood::MoodPolicy;

/// Number of tracks requested when `RECOMMENDATION_LIMIT` is not set.
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

/// Environment variables that must be present before the server or any
/// authenticated command can run.
pub const REQUIRED_VARS: [&str; 7] = [
    "SERVER_ADDRESS",
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_REDIRECT_URI",
    "SPOTIFY_API_AUTH_SCOPE",
    "SPOTIFY_API_AUTH_URL",
    "SPOTIFY_API_TOKEN_URL",
    "SPOTIFY_API_URL",
];

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `moodtunes/.env`. Variables already present in
/// the process environment win over the file.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/moodtunes/.env`
/// - macOS: `~/Library/Application Support/moodtunes/.env`
/// - Windows: `%LOCALAPPDATA%/moodtunes/.env`
///
/// A missing file is not an error, so a fully environment driven deployment
/// works without it.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Returns the location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodtunes/.env");
    path
}

/// Checks that every variable in [`REQUIRED_VARS`] is set.
///
/// The getters below panic on a missing variable, so callers run this once
/// at startup and report all missing names in a single message.
///
/// # Example
///
/// ```
/// if let Err(missing) = config::validate() {
///     error!("Missing configuration: {}", missing.join(", "));
/// }
/// ```
pub fn validate() -> Result<(), Vec<&'static str>> {
    let missing: Vec<&'static str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| env::var(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Returns the address the web application binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable, e.g. `127.0.0.1:8888`.
/// The OAuth redirect URI must point at the `/callback` route of this address.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which specifies
/// the callback URL that Spotify should redirect to after user authorization.
/// This must match the redirect URI registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
///
/// # Example
///
/// ```
/// let redirect_uri = spotify_redirect_uri(); // e.g., "http://127.0.0.1:8888/callback"
/// ```
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// The scope needs at least `user-follow-read`, `user-read-recently-played`,
/// `user-read-private` and `user-read-playback-state` for the recommendation
/// pipeline, plus `streaming` for in-browser playback.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let auth_url = spotify_apiauth_url(); // e.g., "https://accounts.spotify.com/authorize"
/// ```
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the mood policy selected by `MOOD_POLICY`.
///
/// Accepts `threshold` or `keyword`. Unset or unparsable values fall back to
/// [`MoodPolicy::Threshold`].
pub fn mood_policy() -> MoodPolicy {
    env::var("MOOD_POLICY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Returns the number of tracks requested per recommendation call.
///
/// Reads `RECOMMENDATION_LIMIT`; values outside Spotify's accepted range of
/// 1 to 100 are clamped.
pub fn recommendation_limit() -> u32 {
    env::var("RECOMMENDATION_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|limit| limit.clamp(1, 100))
        .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT)
}
