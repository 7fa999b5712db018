use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::{
    Res, api, config, info,
    management::SessionStore,
    mood::MoodPolicy,
    sentiment::{LexiconAnalyzer, SentimentAnalyzer},
};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub analyzer: Arc<dyn SentimentAnalyzer>,
    pub policy: MoodPolicy,
    pub limit: u32,
}

impl AppState {
    pub fn new(policy: MoodPolicy, limit: u32) -> Self {
        Self {
            sessions: SessionStore::new(),
            analyzer: Arc::new(LexiconAnalyzer::default()),
            policy,
            limit,
        }
    }

    /// State configured from `MOOD_POLICY` and `RECOMMENDATION_LIMIT`.
    pub fn from_config() -> Self {
        Self::new(config::mood_policy(), config::recommendation_limit())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/token", get(api::token))
        .route("/recommendations", post(api::recommendations))
        .route("/playback", get(api::playback))
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
