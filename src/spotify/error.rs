use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Spotify Web API client.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Missing, expired or revoked access token (HTTP 401).
    #[error("not authenticated with Spotify")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Spotify answered with status {0}")]
    Status(StatusCode),

    /// Network or transport failure.
    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body did not match the expected shape.
    #[error("unexpected response from Spotify: {0}")]
    Decode(String),
}

impl SpotifyError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized)
    }
}
