//! # Spotify Integration Module
//!
//! This module is the integration layer between moodtunes and the Spotify Web
//! API. It handles the OAuth 2.0 PKCE flow, the HTTP plumbing and the handful
//! of endpoints the recommendation pipeline needs.
//!
//! ## Architecture
//!
//! ```text
//! Web / CLI Layer
//!          ↓
//! Recommendation Pipeline (mood, seeds, fallback)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, JSON, bearer auth)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline talks to Spotify only through [`SpotifyApi`]. The production
//! implementation is [`SpotifyClient`], which holds a single access token and
//! is created per request.
//!
//! ## Core Modules
//!
//! - [`auth`] - PKCE authorization URL, code exchange, token refresh and the
//!   CLI login flow
//! - [`artists`] - followed artists with cursor pagination
//! - [`player`] - recently played tracks and the current playback state
//! - [`tracks`] - recommendations and track lookup by id
//! - [`user`] - the current user's profile and premium check
//!
//! ## API Coverage
//!
//! - `GET /me` - user profile (subscription product)
//! - `GET /me/following?type=artist` - followed artists, cursor paginated
//! - `GET /me/player/recently-played` - listening history
//! - `GET /me/player` - playback state (`204` when idle)
//! - `GET /recommendations` - seeded recommendations with audio-feature constraints
//! - `GET /tracks` - batch track lookup
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! Every call returns [`SpotifyError`]. A `401` becomes
//! [`SpotifyError::Unauthorized`] so callers can tell a dead session apart
//! from a flaky upstream. Nothing in this module retries; degrading to
//! static data is decided one layer up.

pub mod artists;
pub mod auth;
mod client;
mod error;
pub mod player;
pub mod tracks;
pub mod user;

use async_trait::async_trait;

use crate::{
    recommend::RecommendationRequest,
    types::{Artist, PlaybackState, Track, UserProfile},
};

pub use client::SpotifyClient;
pub use error::SpotifyError;

/// The Spotify operations used by the recommendation pipeline.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// One page of followed artists plus the cursor of the next page.
    async fn followed_artists(
        &self,
        limit: u32,
        after: Option<String>,
    ) -> Result<(Vec<Artist>, Option<String>), SpotifyError>;

    /// Ids of recently played tracks, newest first.
    async fn recently_played(&self, limit: u32) -> Result<Vec<String>, SpotifyError>;

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Track>, SpotifyError>;

    async fn tracks(&self, ids: &[&str]) -> Result<Vec<Track>, SpotifyError>;

    async fn current_user(&self) -> Result<UserProfile, SpotifyError>;

    async fn playback_state(&self) -> Result<Option<PlaybackState>, SpotifyError>;
}
