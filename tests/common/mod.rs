#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use moodtunes::{
    recommend::RecommendationRequest,
    spotify::{SpotifyApi, SpotifyError},
    types::{Artist, Image, PlaybackState, Track, TrackAlbum, TrackArtist, UserProfile},
};
use reqwest::StatusCode;

/// In-memory stand-in for the Spotify Web API.
///
/// `None` in any of the optional answers makes the matching call fail.
#[derive(Default)]
pub struct FakeSpotify {
    /// Followed artist pages keyed by the `after` cursor that requests them.
    pub artist_pages: HashMap<Option<String>, (Vec<Artist>, Option<String>)>,
    pub artists_fail: bool,
    pub recent: Option<Vec<String>>,
    pub recommendations: Option<Vec<Track>>,
    pub lookup_fails: bool,
    pub product: Option<String>,
    pub profile_fails: bool,
    /// Every call answers 401, like a revoked token.
    pub revoked: bool,

    pub follow_calls: Mutex<Vec<Option<String>>>,
    pub requests: Mutex<Vec<RecommendationRequest>>,
    pub lookups: Mutex<Vec<Vec<String>>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self {
            recent: Some(Vec::new()),
            recommendations: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_artists(mut self, artists: Vec<Artist>) -> Self {
        self.artist_pages.insert(None, (artists, None));
        self
    }

    pub fn with_recent(mut self, ids: &[&str]) -> Self {
        self.recent = Some(ids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_recommendations(mut self, tracks: Vec<Track>) -> Self {
        self.recommendations = Some(tracks);
        self
    }

    pub fn failing_recommendations(mut self) -> Self {
        self.recommendations = None;
        self
    }

    pub fn last_request(&self) -> Option<RecommendationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn lookups(&self) -> Vec<Vec<String>> {
        self.lookups.lock().unwrap().clone()
    }
}

fn unavailable() -> SpotifyError {
    SpotifyError::Status(StatusCode::SERVICE_UNAVAILABLE)
}

impl FakeSpotify {
    pub fn revoked() -> Self {
        Self {
            revoked: true,
            ..Self::new()
        }
    }

    fn check_token(&self) -> Result<(), SpotifyError> {
        if self.revoked {
            Err(SpotifyError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn followed_artists(
        &self,
        _limit: u32,
        after: Option<String>,
    ) -> Result<(Vec<Artist>, Option<String>), SpotifyError> {
        self.follow_calls.lock().unwrap().push(after.clone());
        self.check_token()?;
        if self.artists_fail {
            return Err(unavailable());
        }
        Ok(self
            .artist_pages
            .get(&after)
            .cloned()
            .unwrap_or((Vec::new(), None)))
    }

    async fn recently_played(&self, limit: u32) -> Result<Vec<String>, SpotifyError> {
        self.check_token()?;
        match &self.recent {
            Some(ids) => Ok(ids.iter().take(limit as usize).cloned().collect()),
            None => Err(unavailable()),
        }
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Track>, SpotifyError> {
        self.requests.lock().unwrap().push(request.clone());
        self.check_token()?;
        self.recommendations.clone().ok_or_else(unavailable)
    }

    async fn tracks(&self, ids: &[&str]) -> Result<Vec<Track>, SpotifyError> {
        self.lookups
            .lock()
            .unwrap()
            .push(ids.iter().map(|s| s.to_string()).collect());
        self.check_token()?;
        if self.lookup_fails {
            return Err(unavailable());
        }
        Ok(ids.iter().map(|id| track(id)).collect())
    }

    async fn current_user(&self) -> Result<UserProfile, SpotifyError> {
        self.check_token()?;
        if self.profile_fails {
            return Err(SpotifyError::Unauthorized);
        }
        Ok(UserProfile {
            id: "user".to_string(),
            display_name: None,
            product: self.product.clone(),
        })
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>, SpotifyError> {
        self.check_token()?;
        Ok(None)
    }
}

pub fn artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artists: vec![TrackArtist {
            id: Some(format!("{}_artist", id)),
            name: format!("Artist of {}", id),
        }],
        album: TrackAlbum {
            name: format!("Album of {}", id),
            images: vec![Image {
                url: format!("https://i.scdn.co/image/{}", id),
                height: Some(640),
                width: Some(640),
            }],
        },
        preview_url: None,
        external_urls: HashMap::from([(
            "spotify".to_string(),
            format!("https://open.spotify.com/track/{}", id),
        )]),
        is_playable: None,
        uri: format!("spotify:track:{}", id),
    }
}

pub fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}
