//! Sentiment analysis of free text.
//!
//! The mood pipeline only needs a polarity/subjectivity pair, so the
//! analyzer sits behind the [`SentimentAnalyzer`] trait. [`LexiconAnalyzer`]
//! is the built-in implementation: a word lexicon averaged over the hits in
//! the text, with intensifiers and negations applied to the following hit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Sentiment;
}

const INTENSIFIER: f64 = 1.3;
const NEGATION: f64 = -0.5;

const INTENSIFIERS: [&str; 7] = [
    "very",
    "really",
    "so",
    "extremely",
    "super",
    "incredibly",
    "totally",
];

const NEGATORS: [&str; 14] = [
    "not", "never", "no", "don't", "dont", "isn't", "isnt", "can't", "cant", "won't", "wasn't",
    "didn't", "aren't", "hardly",
];

// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("blessed", 0.7, 0.8),
    ("bright", 0.7, 0.75),
    ("cheerful", 0.8, 0.8),
    ("content", 0.3, 0.5),
    ("delighted", 0.7, 0.7),
    ("ecstatic", 0.9, 0.9),
    ("energetic", 0.5, 0.7),
    ("energized", 0.6, 0.8),
    ("enjoy", 0.4, 0.5),
    ("excited", 0.4, 0.75),
    ("fantastic", 0.4, 0.9),
    ("fine", 0.4, 0.5),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("grateful", 0.6, 0.7),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hopeful", 0.5, 0.6),
    ("joy", 0.8, 0.9),
    ("joyful", 0.8, 0.9),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("optimistic", 0.6, 0.7),
    ("peaceful", 0.25, 0.4),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.7, 0.9),
    ("proud", 0.8, 1.0),
    ("ready", 0.2, 0.5),
    ("relaxed", 0.2, 0.4),
    ("romantic", 0.5, 0.8),
    ("thrilled", 0.7, 0.8),
    ("wonderful", 1.0, 1.0),
    ("afraid", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("annoyed", -0.4, 0.8),
    ("anxious", -0.25, 0.75),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("bored", -0.5, 1.0),
    ("broken", -0.4, 0.5),
    ("depressed", -0.8, 0.9),
    ("disappointed", -0.75, 0.75),
    ("down", -0.3, 0.5),
    ("exhausted", -0.4, 0.7),
    ("frustrated", -0.4, 0.7),
    ("furious", -0.8, 1.0),
    ("gloomy", -0.6, 0.8),
    ("hate", -0.8, 0.9),
    ("heartbroken", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("lonely", -0.5, 0.8),
    ("mad", -0.6, 1.0),
    ("miserable", -1.0, 1.0),
    ("nervous", -0.3, 0.8),
    ("sad", -0.5, 1.0),
    ("scared", -0.5, 0.8),
    ("stressed", -0.5, 0.8),
    ("terrible", -1.0, 1.0),
    ("tired", -0.4, 0.7),
    ("unhappy", -0.6, 0.9),
    ("upset", -0.5, 0.8),
    ("worried", -0.4, 0.75),
    ("worst", -1.0, 1.0),
    ("calm", 0.3, 0.75),
    ("quiet", 0.0, 0.5),
    ("strange", 0.0, 0.15),
    ("weird", -0.1, 1.0),
];

/// Lexicon based analyzer that averages word scores.
///
/// Text without a single lexicon word is neutral and objective, `(0, 0)`.
pub struct LexiconAnalyzer {
    lexicon: HashMap<&'static str, (f64, f64)>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|(w, p, s)| (*w, (*p, *s))).collect(),
        }
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let mut hits: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for word in tokens(&lowered) {
            if NEGATORS.contains(&word) {
                negated = true;
                continue;
            }
            if INTENSIFIERS.contains(&word) {
                intensity *= INTENSIFIER;
                continue;
            }

            if let Some((polarity, subjectivity)) = self.lexicon.get(word) {
                let mut polarity = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    polarity *= NEGATION;
                }
                let subjectivity = (subjectivity * intensity).clamp(0.0, 1.0);
                hits.push((polarity, subjectivity));
            }

            // modifiers only reach the word right after them
            intensity = 1.0;
            negated = false;
        }

        if hits.is_empty() {
            return Sentiment::default();
        }

        let n = hits.len() as f64;
        let polarity = hits.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = hits.iter().map(|(_, s)| s).sum::<f64>() / n;
        Sentiment::new(polarity, subjectivity)
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
}
