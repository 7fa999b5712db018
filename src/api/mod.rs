//! # API Module
//!
//! HTTP handlers of the moodtunes web application. The handlers are thin:
//! they resolve the session, build a request scoped [`crate::spotify::SpotifyClient`]
//! and hand over to the recommendation pipeline.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - starts a PKCE login and redirects to Spotify
//! - [`callback`] - completes the login identified by the OAuth `state`
//! - [`logout`] - drops the session and its cookie
//! - [`token`] - hands the (refreshed) access token to the browser player
//!
//! ### Recommendations
//!
//! - [`index`] - the mood form
//! - [`recommendations`] - mood text in, mood label and formatted tracks out
//! - [`playback`] - current playback state
//!
//! ### Monitoring
//!
//! - [`health`] - status and version information
//!
//! ## Sessions
//!
//! The session id travels in the [`SESSION_COOKIE`] cookie. A request
//! without a session, or whose session holds no token, is answered with
//! `401 Unauthorized`; nothing here redirects or retries on its own.

mod health;
mod index;
mod login;
mod playback;
mod recommendations;
mod token;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

pub use health::health;
pub use index::index;
pub use login::{callback, login, logout};
pub use playback::playback;
pub use recommendations::{RecommendationsPayload, recommendations};
pub use token::token;

pub const SESSION_COOKIE: &str = "moodtunes_session";

/// Errors answered by the handlers, already mapped onto a status code.
#[derive(Debug)]
pub enum ApiError {
    Unauthenticated,
    TokenUnavailable,
    NoRecommendations,
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
            ApiError::TokenUnavailable => (StatusCode::UNAUTHORIZED, "Token unavailable".to_string()),
            ApiError::NoRecommendations => (
                StatusCode::BAD_GATEWAY,
                "Couldn't generate recommendations based on mood.".to_string(),
            ),
            ApiError::Upstream(reason) => (StatusCode::BAD_GATEWAY, reason),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub(crate) fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty())
}

pub(crate) fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
