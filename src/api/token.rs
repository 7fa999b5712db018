use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::{server::AppState, warning};

use super::{ApiError, session_id};

#[derive(Debug, Serialize)]
pub struct TokenPayload {
    pub token: String,
    pub expires_at: u64,
}

/// Access token for the browser's Web Playback SDK.
pub async fn token(
    jar: CookieJar,
    Extension(state): Extension<AppState>,
) -> Result<Json<TokenPayload>, ApiError> {
    let id = session_id(&jar).ok_or(ApiError::TokenUnavailable)?;

    match state.sessions.valid_token(&id).await {
        Ok(token) => Ok(Json(TokenPayload {
            expires_at: token.expires_at(),
            token: token.access_token,
        })),
        Err(e) => {
            warning!("Token error: {}", e);
            Err(ApiError::TokenUnavailable)
        }
    }
}
