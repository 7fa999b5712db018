use tabled::Table;

use crate::{
    info,
    mood::{MoodPolicy, constraints_for, fallback_tracks},
    sentiment::{LexiconAnalyzer, SentimentAnalyzer},
    types::ConstraintTableRow,
    warning,
};

/// Classifies `text` and shows the constraints it would be sent with.
///
/// Works offline; no token needed.
pub fn mood(text: &str, policy: MoodPolicy) {
    let sentiment = LexiconAnalyzer::default().analyze(text);
    info!(
        "Polarity {:.2}, subjectivity {:.2}",
        sentiment.polarity, sentiment.subjectivity
    );

    let Some(mood) = policy.classify(text, sentiment) else {
        warning!("No mood in empty text.");
        return;
    };
    info!("Mood: {} ({} policy)", mood, policy);

    let constraints = constraints_for(Some(mood));
    if constraints.is_empty() {
        warning!("No audio-feature constraints for {}.", mood);
    } else {
        let rows: Vec<ConstraintTableRow> = constraints
            .query_pairs()
            .into_iter()
            .map(|(constraint, value)| ConstraintTableRow { constraint, value })
            .collect();
        println!("{}", Table::new(rows));
    }

    let fallback = fallback_tracks(Some(mood));
    if !fallback.is_empty() {
        info!("Fallback tracks: {}", fallback.join(", "));
    }
}
