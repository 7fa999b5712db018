use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config,
    recommend::RecommendationRequest,
    types::{Artist, PlaybackState, Track, UserProfile},
};

use super::{SpotifyApi, SpotifyError};

/// Request scoped Spotify Web API client.
///
/// A client carries exactly one access token and is built for the request
/// that needs it; nothing about the signed in user is kept globally.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Creates a client against `SPOTIFY_API_URL`.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(config::spotify_apiurl(), access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, SpotifyError> {
        let response = self.send(path, query).await?;
        decode(response).await
    }

    /// Like [`SpotifyClient::get_json`], but `204 No Content` maps to `None`.
    pub(crate) async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Option<T>, SpotifyError> {
        let response = self.send(path, query).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    async fn send(&self, path: &str, query: &[(String, String)]) -> Result<Response, SpotifyError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        match response.error_for_status() {
            Ok(valid_response) => Ok(valid_response),
            Err(err) => match err.status() {
                Some(StatusCode::UNAUTHORIZED) => Err(SpotifyError::Unauthorized),
                Some(status) => Err(SpotifyError::Status(status)),
                None => Err(SpotifyError::Http(err)),
            },
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SpotifyError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| SpotifyError::Decode(e.to_string()))
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn followed_artists(
        &self,
        limit: u32,
        after: Option<String>,
    ) -> Result<(Vec<Artist>, Option<String>), SpotifyError> {
        self.get_followed_artists(limit, after).await
    }

    async fn recently_played(&self, limit: u32) -> Result<Vec<String>, SpotifyError> {
        self.get_recently_played(limit).await
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Track>, SpotifyError> {
        self.get_recommendations(request).await
    }

    async fn tracks(&self, ids: &[&str]) -> Result<Vec<Track>, SpotifyError> {
        self.get_several_tracks(ids).await
    }

    async fn current_user(&self) -> Result<UserProfile, SpotifyError> {
        self.get_current_user().await
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>, SpotifyError> {
        self.get_playback_state().await
    }
}
