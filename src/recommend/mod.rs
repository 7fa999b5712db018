//! # Recommendation Module
//!
//! Assembles a recommendation request from a mood and the user's listening
//! history, sends it, and falls back to a static per-mood track list when
//! Spotify has nothing to offer.
//!
//! ## Flow
//!
//! 1. Constraints for the mood from [`crate::mood::constraints_for`]
//! 2. Seed candidates from [`seeds::collect_seeds`], cut down by [`SeedSet::select`]
//! 3. One `GET /recommendations` call
//! 4. On an error or an empty answer, a lookup of the mood's fallback ids
//!
//! There is no retry. One failed call means fallback, and only a failing
//! fallback lookup is reported as an error: that is the "no recommendations"
//! outcome, distinct from an empty but successful list. A rejected token is
//! never degraded; it surfaces as [`SpotifyError::Unauthorized`].

pub mod seeds;

use std::fmt;

use crate::{
    info,
    mood::{AudioFeatureConstraints, Mood, constraints_for, fallback_tracks},
    spotify::{SpotifyApi, SpotifyError},
    types::Track,
    warning,
};

pub use seeds::{MAX_SEEDS, SeedCandidates, SeedKind, SeedSet, collect_seeds};

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub limit: u32,
    pub seeds: SeedSet,
    pub constraints: AudioFeatureConstraints,
}

impl RecommendationRequest {
    pub fn new(limit: u32, seeds: SeedSet, constraints: AudioFeatureConstraints) -> Self {
        Self {
            limit,
            seeds,
            constraints,
        }
    }

    /// Query string of the request: `limit`, the present constraints, then the
    /// non-empty seed lists.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("limit".to_string(), self.limit.to_string())];
        pairs.extend(self.constraints.query_pairs());
        pairs.extend(self.seeds.query_pairs());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Spotify answered but without tracks.
    NoTracks,
    /// The recommendation call failed.
    Failed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoTracks => f.write_str("no recommendations returned"),
            FallbackReason::Failed(reason) => write!(f, "recommendation call failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    Live(Vec<Track>),
    Fallback {
        reason: FallbackReason,
        tracks: Vec<Track>,
    },
}

impl Recommendations {
    pub fn tracks(&self) -> &[Track] {
        match self {
            Recommendations::Live(tracks) => tracks,
            Recommendations::Fallback { tracks, .. } => tracks,
        }
    }

    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            Recommendations::Live(tracks) => tracks,
            Recommendations::Fallback { tracks, .. } => tracks,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Recommendations::Live(_) => "live",
            Recommendations::Fallback { .. } => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendations::Fallback { .. })
    }
}

/// Requests up to `limit` recommendations for `mood`.
///
/// # Returns
///
/// - `Ok(Recommendations::Live(tracks))` - Spotify's answer, unchanged
/// - `Ok(Recommendations::Fallback { .. })` - the call failed or came back
///   empty; holds the mood's fallback tracks (truncated to `limit`), or none
///   when the mood has no fallback entry
/// - `Err(SpotifyError)` - Spotify rejected the token, or the fallback
///   lookup itself failed
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new(token);
/// let recs = recommend(&client, Some(Mood::SadAngry), 20).await?;
/// println!("{} tracks from {}", recs.tracks().len(), recs.source());
/// ```
pub async fn recommend<A>(
    api: &A,
    mood: Option<Mood>,
    limit: u32,
) -> Result<Recommendations, SpotifyError>
where
    A: SpotifyApi + ?Sized,
{
    let constraints = constraints_for(mood);
    let candidates = collect_seeds(api).await;
    let seeds = SeedSet::select(&candidates);
    let request = RecommendationRequest::new(limit, seeds, constraints);

    info!(
        "Requesting {} recommendations for mood {} with {} seeds and {} constraints",
        limit,
        mood.map(|m| m.label()).unwrap_or("none"),
        request.seeds.len(),
        request.constraints.len()
    );

    match api.recommendations(&request).await {
        Ok(tracks) if !tracks.is_empty() => Ok(Recommendations::Live(tracks)),
        Ok(_) => {
            warning!("No recommendations found, returning fallback tracks.");
            fallback(api, mood, limit, FallbackReason::NoTracks).await
        }
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            warning!("Error fetching recommendations, returning fallback tracks. Err: {}", e);
            fallback(api, mood, limit, FallbackReason::Failed(e.to_string())).await
        }
    }
}

/// Looks up the static fallback tracks of `mood`, at most `limit` of them.
pub async fn fallback<A>(
    api: &A,
    mood: Option<Mood>,
    limit: u32,
    reason: FallbackReason,
) -> Result<Recommendations, SpotifyError>
where
    A: SpotifyApi + ?Sized,
{
    let ids: Vec<&str> = fallback_tracks(mood)
        .iter()
        .copied()
        .take(limit as usize)
        .collect();

    let tracks = if ids.is_empty() {
        Vec::new()
    } else {
        api.tracks(&ids).await?
    };

    Ok(Recommendations::Fallback { reason, tracks })
}
