use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    format::format_tracks,
    info,
    management::TokenManager,
    mood::MoodPolicy,
    recommend::{self, Recommendations},
    sentiment::{LexiconAnalyzer, SentimentAnalyzer},
    spotify::{SpotifyClient, user::is_premium},
    success,
    types::TrackTableRow,
    warning,
};

/// Runs the full pipeline with the token stored by `moodtunes auth`.
pub async fn recommend(text: &str, policy: MoodPolicy, limit: u32) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run moodtunes auth\n Error: {}",
                e
            );
        }
    };

    let sentiment = LexiconAnalyzer::default().analyze(text);
    let mood = policy.classify(text, sentiment);
    match mood {
        Some(m) => info!("Mood: {}", m),
        None => warning!("No mood in empty text, recommending without constraints."),
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching recommendations...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let client = SpotifyClient::new(token_mgr.get_valid_token().await);
    let result = recommend::recommend(&client, mood, limit).await;
    let premium = is_premium(&client).await;
    pb.finish_and_clear();

    let recs = match result {
        Ok(recs) => recs,
        Err(e) if e.is_unauthorized() => {
            error!("Spotify rejected the token. Please run moodtunes auth");
        }
        Err(e) => error!("Couldn't generate recommendations based on mood. Err: {}", e),
    };

    if let Recommendations::Fallback { reason, .. } = &recs {
        warning!("Showing fallback tracks: {}", reason);
    }
    if recs.tracks().is_empty() {
        warning!("No tracks to show.");
        return;
    }

    let rows: Vec<TrackTableRow> = format_tracks(recs.tracks(), premium)
        .into_iter()
        .map(TrackTableRow::from)
        .collect();
    println!("{}", Table::new(rows));
    success!("{} tracks ({})", recs.tracks().len(), recs.source());
}
