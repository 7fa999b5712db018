use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::get,
};
use moodtunes::{
    spotify::{SpotifyClient, SpotifyError, artists::all_followed_artists},
    types::Track,
};
use serde_json::{Value, json};

type Params = Query<HashMap<String, String>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "artists": [{ "id": "a1", "name": "Artist" }],
        "album": { "name": "Album", "images": [] },
        "preview_url": null,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "uri": format!("spotify:track:{}", id)
    })
}

fn track_ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

fn assert_status(err: SpotifyError, expected: StatusCode) {
    match err {
        SpotifyError::Status(status) => assert_eq!(status, expected),
        other => panic!("expected status {}, got {}", expected, other),
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let router = Router::new().route(
        "/me",
        get(|headers: HeaderMap| async move {
            let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
            if auth == Some("Bearer secret") {
                Json(json!({ "id": "u1", "display_name": "U", "product": "premium" }))
                    .into_response()
            } else {
                StatusCode::UNAUTHORIZED.into_response()
            }
        }),
    );
    let base = serve(router).await;

    let profile = SpotifyClient::with_base_url(&base, "secret")
        .get_current_user()
        .await
        .unwrap();
    assert_eq!(profile.product.as_deref(), Some("premium"));

    let err = SpotifyClient::with_base_url(&base, "wrong")
        .get_current_user()
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_error_statuses() {
    let router = Router::new()
        .route("/me", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/me/player", get(|| async { StatusCode::TOO_MANY_REQUESTS }));
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    assert_status(
        client.get_current_user().await.unwrap_err(),
        StatusCode::SERVICE_UNAVAILABLE,
    );
    assert_status(
        client.get_playback_state().await.unwrap_err(),
        StatusCode::TOO_MANY_REQUESTS,
    );
}

#[tokio::test]
async fn test_unexpected_body_is_a_decode_error() {
    let router = Router::new().route("/me", get(|| async { "not json" }));
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let err = client.get_current_user().await.unwrap_err();
    assert!(matches!(err, SpotifyError::Decode(_)), "{}", err);
}

#[tokio::test]
async fn test_idle_player_is_none() {
    let router = Router::new().route("/me/player", get(|| async { StatusCode::NO_CONTENT }));
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    assert!(client.get_playback_state().await.unwrap().is_none());
}

#[tokio::test]
async fn test_playback_with_local_file() {
    let router = Router::new().route(
        "/me/player",
        get(|| async {
            Json(json!({
                "is_playing": true,
                "progress_ms": 5000,
                "device": { "id": "d1", "name": "Phone", "volume_percent": 80 },
                "item": {
                    "id": null,
                    "name": "Voice Memo",
                    "artists": [],
                    "album": { "name": "", "images": [] },
                    "is_local": true,
                    "uri": "spotify:local:::Voice+Memo:60"
                }
            }))
        }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let playback = client.get_playback_state().await.unwrap().unwrap();
    assert!(playback.is_playing);
    assert_eq!(playback.item.unwrap().name, "Voice Memo");
}

#[tokio::test]
async fn test_followed_artists_cursor() {
    let seen: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
    let log = seen.clone();
    let router = Router::new().route(
        "/me/following",
        get(move |Query(params): Params| {
            let log = log.clone();
            async move {
                let after = params.get("after").cloned();
                log.lock().unwrap().push(params);
                match after.as_deref() {
                    None => Json(json!({ "artists": {
                        "items": [{ "id": "a1", "name": "One", "genres": ["rock"] }],
                        "next": "https://api.spotify.com/v1/me/following?after=c1",
                        "cursors": { "after": "c1" },
                        "total": 2
                    }})),
                    // the last page still carries a cursor, but no `next`
                    _ => Json(json!({ "artists": {
                        "items": [{ "id": "a2", "name": "Two" }],
                        "next": null,
                        "cursors": { "after": "c2" },
                        "total": 2
                    }})),
                }
            }
        }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let (first, cursor) = client.get_followed_artists(50, None).await.unwrap();
    assert_eq!(first[0].id, "a1");
    assert_eq!(cursor.as_deref(), Some("c1"));

    let (second, cursor) = client
        .get_followed_artists(50, Some("c1".to_string()))
        .await
        .unwrap();
    assert_eq!(second[0].id, "a2");
    assert!(second[0].genres.is_empty());
    assert_eq!(cursor, None);

    let all = all_followed_artists(&client, 50).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0].get("type").map(String::as_str), Some("artist"));
    assert_eq!(seen[0].get("limit").map(String::as_str), Some("50"));
}

#[tokio::test]
async fn test_several_tracks_drops_unknown_ids() {
    let router = Router::new().route(
        "/tracks",
        get(|| async { Json(json!({ "tracks": [track_json("t1"), null, track_json("t3")] })) }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let tracks = client.get_several_tracks(&["t1", "nope", "t3"]).await.unwrap();
    assert_eq!(track_ids(&tracks), vec!["t1", "t3"]);
}

#[tokio::test]
async fn test_several_tracks_are_batched() {
    let batches: Arc<Mutex<Vec<usize>>> = Arc::default();
    let log = batches.clone();
    let router = Router::new().route(
        "/tracks",
        get(move |Query(params): Params| {
            let log = log.clone();
            async move {
                let ids: Vec<String> = params["ids"].split(',').map(str::to_string).collect();
                log.lock().unwrap().push(ids.len());
                let tracks: Vec<Value> = ids.iter().map(|id| track_json(id)).collect();
                Json(json!({ "tracks": tracks }))
            }
        }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let ids: Vec<String> = (0..51).map(|i| format!("t{}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let tracks = client.get_several_tracks(&refs).await.unwrap();

    assert_eq!(tracks.len(), 51);
    assert_eq!(*batches.lock().unwrap(), vec![50, 1]);
}

#[tokio::test]
async fn test_recommendations_absent_or_empty_tracks() {
    use moodtunes::{
        mood::{Mood, constraints_for},
        recommend::{RecommendationRequest, SeedSet},
    };

    let seen: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
    let log = seen.clone();
    let router = Router::new().route(
        "/recommendations",
        get(move |Query(params): Params| {
            let log = log.clone();
            async move {
                let answer = match params.get("limit").map(String::as_str) {
                    Some("1") => json!({}),
                    Some("2") => json!({ "tracks": [] }),
                    _ => json!({ "tracks": [track_json("r1")] }),
                };
                log.lock().unwrap().push(params);
                Json(answer)
            }
        }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    let seeds = SeedSet {
        artists: vec!["a1".to_string()],
        ..Default::default()
    };
    let request = |limit| {
        RecommendationRequest::new(limit, seeds.clone(), constraints_for(Some(Mood::SadAngry)))
    };

    assert!(client.get_recommendations(&request(1)).await.unwrap().is_empty());
    assert!(client.get_recommendations(&request(2)).await.unwrap().is_empty());
    let live = client.get_recommendations(&request(20)).await.unwrap();
    assert_eq!(track_ids(&live), vec!["r1"]);

    let seen = seen.lock().unwrap();
    let last = &seen[2];
    assert_eq!(last.get("limit").map(String::as_str), Some("20"));
    assert_eq!(last.get("target_valence").map(String::as_str), Some("0.2"));
    assert_eq!(last.get("seed_artists").map(String::as_str), Some("a1"));
    assert!(!last.contains_key("seed_tracks"));
    assert!(!last.contains_key("seed_genres"));
}

#[tokio::test]
async fn test_recently_played_skips_local_files() {
    let router = Router::new().route(
        "/me/player/recently-played",
        get(|| async {
            Json(json!({ "items": [
                { "track": { "id": "t1" } },
                { "track": { "id": null } },
                { "track": { "id": "t2" } }
            ]}))
        }),
    );
    let client = SpotifyClient::with_base_url(serve(router).await, "token");

    assert_eq!(client.get_recently_played(10).await.unwrap(), vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let router = Router::new().route("/me/player", get(|| async { StatusCode::NO_CONTENT }));
    let client = SpotifyClient::with_base_url(format!("{}/", serve(router).await), "token");

    assert!(client.get_playback_state().await.unwrap().is_none());
}
