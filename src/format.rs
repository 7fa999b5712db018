use serde::{Deserialize, Serialize};

use crate::types::{Track, TrackTableRow};

/// Display projection of a Spotify track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTrack {
    pub id: String,
    pub name: String,
    /// All artist names joined with `", "`.
    pub artist: String,
    pub album: String,
    pub image: Option<String>,
    pub preview_url: Option<String>,
    pub spotify_url: Option<String>,
    pub uri: String,
    pub can_play_in_browser: bool,
}

/// Projects `track` for display.
///
/// In-browser playback needs a premium account, and a track Spotify marks as
/// not playable stays off even then. Unknown playability counts as playable.
pub fn format_track(track: &Track, is_premium: bool) -> FormattedTrack {
    FormattedTrack {
        id: track.id.clone(),
        name: track.name.clone(),
        artist: track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        album: track.album.name.clone(),
        image: track.album.images.first().map(|i| i.url.clone()),
        preview_url: track.preview_url.clone(),
        spotify_url: track.external_urls.get("spotify").cloned(),
        uri: track.uri.clone(),
        can_play_in_browser: is_premium && track.is_playable.unwrap_or(true),
    }
}

pub fn format_tracks(tracks: &[Track], is_premium: bool) -> Vec<FormattedTrack> {
    tracks.iter().map(|t| format_track(t, is_premium)).collect()
}

impl From<FormattedTrack> for TrackTableRow {
    fn from(t: FormattedTrack) -> Self {
        TrackTableRow {
            name: t.name,
            artist: t.artist,
            album: t.album,
            url: t.spotify_url.unwrap_or_default(),
        }
    }
}
