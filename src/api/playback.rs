use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::{
    format::{FormattedTrack, format_track},
    server::AppState,
    spotify::{SpotifyApi, SpotifyClient, user::is_premium},
    types::Device,
};

use super::{ApiError, session_id};

#[derive(Debug, Default, Serialize)]
pub struct PlaybackPayload {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub device: Option<Device>,
    pub item: Option<FormattedTrack>,
}

pub async fn playback(
    jar: CookieJar,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlaybackPayload>, ApiError> {
    let id = session_id(&jar).ok_or(ApiError::Unauthenticated)?;
    let token = state
        .sessions
        .valid_token(&id)
        .await
        .map_err(|_| ApiError::Unauthenticated)?;
    let client = SpotifyClient::new(token.access_token);

    let playback = match client.playback_state().await {
        Ok(Some(playback)) => playback,
        Ok(None) => return Ok(Json(PlaybackPayload::default())),
        Err(e) if e.is_unauthorized() => return Err(ApiError::Unauthenticated),
        Err(e) => return Err(ApiError::Upstream(e.to_string())),
    };

    let item = match &playback.item {
        Some(track) => Some(format_track(track, is_premium(&client).await)),
        None => None,
    };

    Ok(Json(PlaybackPayload {
        is_playing: playback.is_playing,
        progress_ms: playback.progress_ms,
        device: playback.device,
        item,
    }))
}
