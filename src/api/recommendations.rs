use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    format::{FormattedTrack, format_tracks},
    info,
    mood::Mood,
    recommend::{Recommendations, recommend},
    sentiment::{Sentiment, SentimentAnalyzer},
    server::AppState,
    spotify::{SpotifyClient, user::is_premium},
    warning,
};

use super::{ApiError, session_id};

#[derive(Debug, Deserialize)]
pub struct MoodForm {
    #[serde(default)]
    pub mood_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsPayload {
    pub mood: Option<Mood>,
    pub sentiment: Sentiment,
    /// `live` or `fallback`.
    pub source: String,
    pub fallback_reason: Option<String>,
    pub premium: bool,
    pub tracks: Vec<FormattedTrack>,
}

pub async fn recommendations(
    jar: CookieJar,
    Extension(state): Extension<AppState>,
    Form(form): Form<MoodForm>,
) -> Result<Json<RecommendationsPayload>, ApiError> {
    let id = session_id(&jar).ok_or(ApiError::Unauthenticated)?;
    let token = state
        .sessions
        .valid_token(&id)
        .await
        .map_err(|_| ApiError::Unauthenticated)?;
    let client = SpotifyClient::new(token.access_token);

    let sentiment = state.analyzer.analyze(&form.mood_text);
    let mood = state.policy.classify(&form.mood_text, sentiment);
    info!(
        "Mood {} (polarity {:.2}, subjectivity {:.2}) with policy {}",
        mood.map(|m| m.label()).unwrap_or("none"),
        sentiment.polarity,
        sentiment.subjectivity,
        state.policy
    );

    let recs = match recommend(&client, mood, state.limit).await {
        Ok(recs) => recs,
        Err(e) if e.is_unauthorized() => return Err(ApiError::Unauthenticated),
        Err(e) => {
            warning!("Recommendation error: {}", e);
            return Err(ApiError::NoRecommendations);
        }
    };

    let premium = is_premium(&client).await;
    let fallback_reason = match &recs {
        Recommendations::Fallback { reason, .. } => Some(reason.to_string()),
        Recommendations::Live(_) => None,
    };

    Ok(Json(RecommendationsPayload {
        mood,
        sentiment,
        source: recs.source().to_string(),
        fallback_reason,
        premium,
        tracks: format_tracks(recs.tracks(), premium),
    }))
}
