mod common;

use common::{FakeSpotify, track};
use moodtunes::{
    format::{format_track, format_tracks},
    spotify::user::is_premium,
    types::{Track, TrackArtist, TrackTableRow},
};

#[test]
fn test_format_track_fields() {
    let formatted = format_track(&track("abc"), false);

    assert_eq!(formatted.id, "abc");
    assert_eq!(formatted.name, "Track abc");
    assert_eq!(formatted.artist, "Artist of abc");
    assert_eq!(formatted.album, "Album of abc");
    assert_eq!(formatted.image.as_deref(), Some("https://i.scdn.co/image/abc"));
    assert_eq!(
        formatted.spotify_url.as_deref(),
        Some("https://open.spotify.com/track/abc")
    );
    assert_eq!(formatted.uri, "spotify:track:abc");
    assert_eq!(formatted.preview_url, None);
}

#[test]
fn test_artists_are_joined() {
    let mut t = track("abc");
    t.artists.push(TrackArtist {
        id: None,
        name: "Guest".to_string(),
    });

    assert_eq!(format_track(&t, false).artist, "Artist of abc, Guest");
}

#[test]
fn test_browser_playback_needs_premium() {
    let t = track("abc");
    assert!(!format_track(&t, false).can_play_in_browser);
    assert!(format_track(&t, true).can_play_in_browser);
}

#[test]
fn test_unplayable_track_stays_off() {
    let mut t = track("abc");
    t.is_playable = Some(false);
    assert!(!format_track(&t, true).can_play_in_browser);
}

#[test]
fn test_missing_optional_fields() {
    let t = Track {
        id: "bare".to_string(),
        name: "Bare".to_string(),
        ..Default::default()
    };

    let formatted = format_track(&t, true);
    assert_eq!(formatted.artist, "");
    assert_eq!(formatted.image, None);
    assert_eq!(formatted.spotify_url, None);
}

#[test]
fn test_format_tracks_keeps_order() {
    let formatted = format_tracks(&[track("a"), track("b")], false);
    let ids: Vec<&str> = formatted.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_table_row() {
    let row = TrackTableRow::from(format_track(&track("abc"), false));
    assert_eq!(row.name, "Track abc");
    assert_eq!(row.url, "https://open.spotify.com/track/abc");
}

#[tokio::test]
async fn test_is_premium() {
    let premium = FakeSpotify {
        product: Some("premium".to_string()),
        ..FakeSpotify::new()
    };
    let free = FakeSpotify {
        product: Some("free".to_string()),
        ..FakeSpotify::new()
    };
    let broken = FakeSpotify {
        profile_fails: true,
        ..FakeSpotify::new()
    };

    assert!(is_premium(&premium).await);
    assert!(!is_premium(&free).await);
    assert!(!is_premium(&broken).await);
}
