use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::{server::AppState, spotify, success, utils, warning};

use super::{ApiError, SESSION_COOKIE, session_cookie, session_id};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn login(
    jar: CookieJar,
    Extension(state): Extension<AppState>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let login = state
        .sessions
        .begin_login(session_id(&jar), code_verifier)
        .await;

    let auth_url =
        spotify::auth::authorize_url(&code_challenge, &login.state).map_err(ApiError::Internal)?;
    Ok((jar.add(session_cookie(login.session_id)), Redirect::to(&auth_url)))
}

/// Completes a login started by `/login` or by `moodtunes auth`.
///
/// The OAuth `state` resolves to the session holding the verifier. On success
/// the browser gets that session's cookie, so a CLI login also signs the
/// browser in.
pub async fn callback(
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    if let Some(error) = params.error {
        warning!("Spotify refused the authorization: {}", error);
        return (StatusCode::BAD_REQUEST, Html("<h4>Login failed.</h4>")).into_response();
    }

    let Some(code) = params.code else {
        return (StatusCode::BAD_REQUEST, Html("<h4>Authorization code missing.</h4>")).into_response();
    };
    let Some(login_state) = params.state else {
        return (StatusCode::BAD_REQUEST, Html("<h4>Missing login state.</h4>")).into_response();
    };
    let Some((session, verifier)) = state.sessions.take_login(&login_state).await else {
        return (StatusCode::BAD_REQUEST, Html("<h4>Unknown or expired login.</h4>")).into_response();
    };

    match spotify::auth::exchange_code_pkce(&code, &verifier).await {
        Ok(token) => {
            if !state.sessions.store_token(&session, token).await {
                return (StatusCode::BAD_REQUEST, Html("<h4>Login expired.</h4>")).into_response();
            }
            success!("Signed in a new session");
            (jar.add(session_cookie(session)), Redirect::to("/")).into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (StatusCode::BAD_REQUEST, Html("<h4>Authentication failed.</h4>")).into_response()
        }
    }
}

pub async fn logout(jar: CookieJar, Extension(state): Extension<AppState>) -> (CookieJar, Redirect) {
    if let Some(id) = session_id(&jar) {
        state.sessions.remove(&id).await;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}
