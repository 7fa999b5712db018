//! # Mood Module
//!
//! Turns the output of a sentiment analyzer into one discrete [`Mood`] label
//! and maps that label onto Spotify audio-feature constraints.
//!
//! ## Policies
//!
//! Two mood policies are available and selected through configuration
//! (`MOOD_POLICY`) or per CLI invocation:
//!
//! - [`MoodPolicy::Threshold`] - a decision tree over polarity and
//!   subjectivity only. This is the default.
//! - [`MoodPolicy::Keyword`] - a polarity tree whose neutral band is split on
//!   keywords found in the text (`relax`, `calm`, `peace` versus `energy`,
//!   `excit`, `dance`).
//!
//! All comparisons are strict and evaluated strongest signal first, so a
//! value sitting exactly on a threshold falls to the next branch.
//!
//! ## Related Modules
//!
//! - [`params`] - the static mood to constraint table and fallback tracks
//! - [`crate::sentiment`] - produces the [`Sentiment`] consumed here

pub mod params;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

pub use params::{
    AudioFeature, AudioFeatureConstraints, Bound, FeatureBounds, constraint_key, constraints_for,
    fallback_tracks,
};

/// Polarity above which text counts as positive in the threshold policy.
pub const POSITIVE_POLARITY: f64 = 0.2;
/// Polarity below which text counts as negative in the threshold policy.
pub const NEGATIVE_POLARITY: f64 = -0.2;
/// Subjectivity above which text counts as emotionally charged.
pub const SUBJECTIVE: f64 = 0.5;
/// Polarity magnitude treated as a strong signal by the keyword policy.
pub const STRONG_POLARITY: f64 = 0.5;

const RELAXED_KEYWORDS: [&str; 3] = ["relax", "calm", "peace"];
const ENERGETIC_KEYWORDS: [&str; 3] = ["energy", "excit", "dance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Excited/Joyful")]
    ExcitedJoyful,
    #[serde(rename = "Generally Positive")]
    GenerallyPositive,
    #[serde(rename = "Sad/Angry")]
    SadAngry,
    #[serde(rename = "Generally Negative")]
    GenerallyNegative,
    #[serde(rename = "Neutral/Ambivalent")]
    NeutralAmbivalent,
    #[serde(rename = "Calm/Peaceful")]
    CalmPeaceful,
    #[serde(rename = "Calm/Relaxed")]
    CalmRelaxed,
    #[serde(rename = "Romantic")]
    Romantic,
    #[serde(rename = "Melancholy")]
    Melancholy,
    #[serde(rename = "Focused/Productive")]
    FocusedProductive,
    #[serde(rename = "Party/High Energy")]
    PartyHighEnergy,
    #[serde(rename = "Chill/Vibey")]
    ChillVibey,
    #[serde(rename = "Dark/Intense")]
    DarkIntense,
}

impl Mood {
    pub const ALL: [Mood; 13] = [
        Mood::ExcitedJoyful,
        Mood::GenerallyPositive,
        Mood::SadAngry,
        Mood::GenerallyNegative,
        Mood::NeutralAmbivalent,
        Mood::CalmPeaceful,
        Mood::CalmRelaxed,
        Mood::Romantic,
        Mood::Melancholy,
        Mood::FocusedProductive,
        Mood::PartyHighEnergy,
        Mood::ChillVibey,
        Mood::DarkIntense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::ExcitedJoyful => "Excited/Joyful",
            Mood::GenerallyPositive => "Generally Positive",
            Mood::SadAngry => "Sad/Angry",
            Mood::GenerallyNegative => "Generally Negative",
            Mood::NeutralAmbivalent => "Neutral/Ambivalent",
            Mood::CalmPeaceful => "Calm/Peaceful",
            Mood::CalmRelaxed => "Calm/Relaxed",
            Mood::Romantic => "Romantic",
            Mood::Melancholy => "Melancholy",
            Mood::FocusedProductive => "Focused/Productive",
            Mood::PartyHighEnergy => "Party/High Energy",
            Mood::ChillVibey => "Chill/Vibey",
            Mood::DarkIntense => "Dark/Intense",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown mood: {}", s))
    }
}

/// Strategy used to turn a [`Sentiment`] into a [`Mood`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoodPolicy {
    /// Polarity and subjectivity thresholds only.
    #[default]
    Threshold,
    /// Polarity thresholds with a keyword split of the neutral band.
    Keyword,
}

impl MoodPolicy {
    /// Classifies `text` given its sentiment.
    ///
    /// Returns `None` for empty or whitespace-only text, whatever the
    /// sentiment says. Otherwise exactly one mood is returned and the result
    /// depends only on the arguments.
    ///
    /// # Example
    ///
    /// ```
    /// let sentiment = Sentiment { polarity: 0.6, subjectivity: 0.7 };
    /// let mood = MoodPolicy::Threshold.classify("ready to dance", sentiment);
    /// assert_eq!(mood, Some(Mood::ExcitedJoyful));
    /// ```
    pub fn classify(&self, text: &str, sentiment: Sentiment) -> Option<Mood> {
        if text.trim().is_empty() {
            return None;
        }

        let mood = match self {
            MoodPolicy::Threshold => by_threshold(sentiment),
            MoodPolicy::Keyword => by_keyword(&text.to_lowercase(), sentiment),
        };
        Some(mood)
    }
}

impl fmt::Display for MoodPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodPolicy::Threshold => f.write_str("threshold"),
            MoodPolicy::Keyword => f.write_str("keyword"),
        }
    }
}

impl FromStr for MoodPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "threshold" => Ok(MoodPolicy::Threshold),
            "keyword" => Ok(MoodPolicy::Keyword),
            other => Err(format!(
                "unknown mood policy '{}', expected 'threshold' or 'keyword'",
                other
            )),
        }
    }
}

fn by_threshold(s: Sentiment) -> Mood {
    if s.polarity > POSITIVE_POLARITY {
        if s.subjectivity > SUBJECTIVE {
            Mood::ExcitedJoyful
        } else {
            Mood::GenerallyPositive
        }
    } else if s.polarity < NEGATIVE_POLARITY {
        if s.subjectivity > SUBJECTIVE {
            Mood::SadAngry
        } else {
            Mood::GenerallyNegative
        }
    } else if s.subjectivity > SUBJECTIVE {
        Mood::NeutralAmbivalent
    } else {
        Mood::CalmPeaceful
    }
}

// `lowered` must already be lowercase
fn by_keyword(lowered: &str, s: Sentiment) -> Mood {
    if s.polarity > STRONG_POLARITY {
        Mood::ExcitedJoyful
    } else if s.polarity > POSITIVE_POLARITY {
        Mood::GenerallyPositive
    } else if s.polarity < -STRONG_POLARITY {
        Mood::SadAngry
    } else if s.polarity < NEGATIVE_POLARITY {
        Mood::Melancholy
    } else if RELAXED_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Mood::CalmRelaxed
    } else if ENERGETIC_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Mood::PartyHighEnergy
    } else {
        Mood::NeutralAmbivalent
    }
}
