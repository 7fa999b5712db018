use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{
    config, error,
    management::{SessionStore, TokenManager},
    server::{AppState, start_api_server},
    success,
    types::Token,
    utils, warning,
};

use super::SpotifyError;

/// Seconds the CLI waits for the browser login to finish.
const LOGIN_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

/// Initiates the complete OAuth 2.0 PKCE authentication flow for the CLI.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating PKCE code verifier and challenge
/// 2. Registering a pending login in the session store
/// 3. Starting the local web server that owns the `/callback` route
/// 4. Opening the authorization URL in the user's browser
/// 5. Waiting for the callback to store a token in the session
/// 6. Persisting the obtained token for later `recommend` runs
///
/// The login's OAuth `state` is how the callback finds the verifier and the
/// session to store the token in.
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(state: AppState) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let login = state.sessions.begin_login(None, code_verifier).await;

    let server_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    let auth_url = match authorize_url(&code_challenge, &login.state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(&state.sessions, &login.session_id).await {
        Some(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the session store until the login identified by `session_id` holds
/// a token, or [`LOGIN_TIMEOUT_SECS`] pass.
async fn wait_for_token(sessions: &SessionStore, session_id: &str) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(LOGIN_TIMEOUT_SECS);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(token) = sessions.token(session_id).await {
            return Some(token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Builds the Spotify authorization URL for a PKCE login.
///
/// `state` is echoed back on the callback and identifies the pending login.
/// It must never be the session id, which would leak into browser history.
pub fn authorize_url(code_challenge: &str, state: &str) -> Result<String, String> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id().as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier that was generated at the start of the flow
///
/// # Error Handling
///
/// Common failure scenarios:
/// - Invalid or expired authorization code
/// - Code verifier doesn't match the challenge
/// - Network connectivity issues
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, SpotifyError> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let res = request_token(&[
        ("grant_type", "authorization_code"),
        ("client_id", &client_id),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", &redirect_uri),
    ])
    .await?;

    Ok(into_token(res, None))
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token; when the response carries
/// none the previous one is kept.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, SpotifyError> {
    let client_id = config::spotify_client_id();

    let res = request_token(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", &client_id),
    ])
    .await?;

    Ok(into_token(res, Some(refresh_token)))
}

async fn request_token(form: &[(&str, &str)]) -> Result<TokenResponse, SpotifyError> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await?;

    match res.status() {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(SpotifyError::Unauthorized),
        status if !status.is_success() => Err(SpotifyError::Status(status)),
        _ => res
            .json::<TokenResponse>()
            .await
            .map_err(|e| SpotifyError::Decode(e.to_string())),
    }
}

fn into_token(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
