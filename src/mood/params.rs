use std::fmt;

use super::Mood;

/// Audio features understood by the Spotify recommendations endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFeature {
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Liveness,
    Speechiness,
    Valence,
    Tempo,
    Mode,
    Popularity,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 10] = [
        AudioFeature::Acousticness,
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Instrumentalness,
        AudioFeature::Liveness,
        AudioFeature::Speechiness,
        AudioFeature::Valence,
        AudioFeature::Tempo,
        AudioFeature::Mode,
        AudioFeature::Popularity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Danceability => "danceability",
            AudioFeature::Energy => "energy",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Liveness => "liveness",
            AudioFeature::Speechiness => "speechiness",
            AudioFeature::Valence => "valence",
            AudioFeature::Tempo => "tempo",
            AudioFeature::Mode => "mode",
            AudioFeature::Popularity => "popularity",
        }
    }

    /// Whether `value` lies inside the range Spotify accepts for this feature.
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            AudioFeature::Tempo => value > 0.0,
            AudioFeature::Mode => value == 0.0 || value == 1.0,
            AudioFeature::Popularity => (0.0..=100.0).contains(&value),
            _ => (0.0..=1.0).contains(&value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Target,
    Max,
}

impl Bound {
    pub fn prefix(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Target => "target",
            Bound::Max => "max",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureBounds {
    pub min: Option<f64>,
    pub target: Option<f64>,
    pub max: Option<f64>,
}

impl FeatureBounds {
    fn get(&self, bound: Bound) -> Option<f64> {
        match bound {
            Bound::Min => self.min,
            Bound::Target => self.target,
            Bound::Max => self.max,
        }
    }

    fn set(&mut self, bound: Bound, value: f64) {
        match bound {
            Bound::Min => self.min = Some(value),
            Bound::Target => self.target = Some(value),
            Bound::Max => self.max = Some(value),
        }
    }
}

/// A set of `min_*`, `target_*` and `max_*` constraints.
///
/// Only the values that are present end up in a recommendation request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioFeatureConstraints {
    pub acousticness: FeatureBounds,
    pub danceability: FeatureBounds,
    pub energy: FeatureBounds,
    pub instrumentalness: FeatureBounds,
    pub liveness: FeatureBounds,
    pub speechiness: FeatureBounds,
    pub valence: FeatureBounds,
    pub tempo: FeatureBounds,
    pub mode: FeatureBounds,
    pub popularity: FeatureBounds,
}

impl AudioFeatureConstraints {
    pub fn with(mut self, feature: AudioFeature, bound: Bound, value: f64) -> Self {
        self.bounds_mut(feature).set(bound, value);
        self
    }

    pub fn bounds(&self, feature: AudioFeature) -> &FeatureBounds {
        match feature {
            AudioFeature::Acousticness => &self.acousticness,
            AudioFeature::Danceability => &self.danceability,
            AudioFeature::Energy => &self.energy,
            AudioFeature::Instrumentalness => &self.instrumentalness,
            AudioFeature::Liveness => &self.liveness,
            AudioFeature::Speechiness => &self.speechiness,
            AudioFeature::Valence => &self.valence,
            AudioFeature::Tempo => &self.tempo,
            AudioFeature::Mode => &self.mode,
            AudioFeature::Popularity => &self.popularity,
        }
    }

    fn bounds_mut(&mut self, feature: AudioFeature) -> &mut FeatureBounds {
        match feature {
            AudioFeature::Acousticness => &mut self.acousticness,
            AudioFeature::Danceability => &mut self.danceability,
            AudioFeature::Energy => &mut self.energy,
            AudioFeature::Instrumentalness => &mut self.instrumentalness,
            AudioFeature::Liveness => &mut self.liveness,
            AudioFeature::Speechiness => &mut self.speechiness,
            AudioFeature::Valence => &mut self.valence,
            AudioFeature::Tempo => &mut self.tempo,
            AudioFeature::Mode => &mut self.mode,
            AudioFeature::Popularity => &mut self.popularity,
        }
    }

    /// Present constraints in a stable order: feature, then min, target, max.
    pub fn entries(&self) -> Vec<(AudioFeature, Bound, f64)> {
        let mut entries = Vec::new();
        for feature in AudioFeature::ALL {
            let bounds = self.bounds(feature);
            for bound in [Bound::Min, Bound::Target, Bound::Max] {
                if let Some(value) = bounds.get(bound) {
                    entries.push((feature, bound, value));
                }
            }
        }
        entries
    }

    /// Looks a constraint up by its request name, e.g. `target_valence`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(feature, bound, _)| constraint_key(*feature, *bound) == key)
            .map(|(_, _, value)| value)
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .map(|(feature, bound, value)| (constraint_key(feature, bound), value.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks every present value against its feature's valid range.
    pub fn validate(&self) -> Result<(), String> {
        for (feature, bound, value) in self.entries() {
            if !feature.accepts(value) {
                return Err(format!(
                    "{} = {} is out of range",
                    constraint_key(feature, bound),
                    value
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for AudioFeatureConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

pub fn constraint_key(feature: AudioFeature, bound: Bound) -> String {
    format!("{}_{}", bound.prefix(), feature.name())
}

/// Returns the audio-feature constraints associated with a mood.
///
/// Moods without an entry, and no mood at all, give an empty set. The
/// recommendation call then runs on seeds alone.
pub fn constraints_for(mood: Option<Mood>) -> AudioFeatureConstraints {
    use AudioFeature::*;
    use Bound::*;

    let c = AudioFeatureConstraints::default();
    let Some(mood) = mood else {
        return c;
    };

    match mood {
        Mood::ExcitedJoyful => c
            .with(Valence, Target, 0.8)
            .with(Energy, Target, 0.8)
            .with(Danceability, Min, 0.6),
        Mood::GenerallyPositive => c
            .with(Valence, Target, 0.65)
            .with(Energy, Target, 0.6)
            .with(Danceability, Min, 0.6),
        Mood::SadAngry => c
            .with(Valence, Target, 0.2)
            .with(Energy, Target, 0.7)
            .with(Acousticness, Max, 0.4),
        Mood::CalmRelaxed => c
            .with(Energy, Target, 0.3)
            .with(Acousticness, Target, 0.8)
            .with(Danceability, Max, 0.4),
        Mood::Romantic => c
            .with(Valence, Target, 0.6)
            .with(Acousticness, Target, 0.5)
            .with(Energy, Target, 0.4)
            .with(Valence, Min, 0.4),
        Mood::Melancholy => c
            .with(Valence, Target, 0.3)
            .with(Acousticness, Target, 0.6)
            .with(Energy, Max, 0.4),
        Mood::FocusedProductive => c
            .with(Instrumentalness, Target, 0.7)
            .with(Energy, Target, 0.4)
            .with(Valence, Target, 0.5),
        Mood::PartyHighEnergy => c
            .with(Energy, Target, 0.9)
            .with(Valence, Target, 0.75)
            .with(Danceability, Min, 0.7),
        Mood::ChillVibey => c
            .with(Valence, Target, 0.55)
            .with(Energy, Target, 0.4)
            .with(Acousticness, Target, 0.5),
        Mood::DarkIntense => c
            .with(Valence, Target, 0.2)
            .with(Energy, Target, 0.8)
            .with(Mode, Target, 0.0),
        Mood::GenerallyNegative | Mood::NeutralAmbivalent | Mood::CalmPeaceful => c,
    }
}

/// Hand-picked track ids served when Spotify returns no recommendations.
pub fn fallback_tracks(mood: Option<Mood>) -> &'static [&'static str] {
    match mood {
        Some(Mood::ExcitedJoyful) => &["1u8c2t2Cy7UBoG4ArRcF5g", "3AJwUDP919kvQ9QcozQPxg"],
        Some(Mood::GenerallyPositive) => &["3AJwUDP919kvQ9QcozQPxg", "1u8c2t2Cy7UBoG4ArRcF5g"],
        Some(Mood::SadAngry) => &["3YRCqOhFifThpSRFJ1VWFM", "7tFiyTwD0nx5a1eklYtX2J"],
        Some(Mood::CalmRelaxed) => &["6nek1Nin9q48AVZcWs9e9D", "5QDLhrAOJJdNAmCTJ8xMyW"],
        Some(Mood::Romantic) => &["5QDLhrAOJJdNAmCTJ8xMyW", "6nek1Nin9q48AVZcWs9e9D"],
        Some(Mood::Melancholy) => &["7tFiyTwD0nx5a1eklYtX2J", "3YRCqOhFifThpSRFJ1VWFM"],
        Some(Mood::FocusedProductive) => &["3AJwUDP919kvQ9QcozQPxg", "6nek1Nin9q48AVZcWs9e9D"],
        Some(Mood::PartyHighEnergy) => &["1u8c2t2Cy7UBoG4ArRcF5g", "3AJwUDP919kvQ9QcozQPxg"],
        Some(Mood::ChillVibey) => &["6nek1Nin9q48AVZcWs9e9D", "5QDLhrAOJJdNAmCTJ8xMyW"],
        Some(Mood::DarkIntense) => &["3YRCqOhFifThpSRFJ1VWFM", "7tFiyTwD0nx5a1eklYtX2J"],
        _ => &[],
    }
}
