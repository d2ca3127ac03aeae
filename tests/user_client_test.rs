use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use genrecli::{
    error::HarvestError,
    profile::{self, TIME_RANGES},
    spotify::user::SpotifyUserClient,
    types::TimeRange,
};
use serde_json::{Value, json};

type Params = Query<HashMap<String, String>>;

/// Requests seen by the stub, as (path, query) pairs.
#[derive(Default)]
struct Log {
    requests: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl Log {
    fn record(&self, path: &str, params: &HashMap<String, String>) {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));
    }

    fn params_for(&self, path: &str) -> Vec<HashMap<String, String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer user-token")
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "The access token expired" } })),
    )
}

fn track(id: &str, duration_ms: u64, artist: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "duration_ms": duration_ms,
        "artists": [{ "id": artist, "name": format!("Artist {}", artist) }]
    })
}

fn top_artist(id: &str, genres: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {}", id),
        "popularity": 60,
        "followers": { "href": null, "total": 4200 },
        "genres": genres,
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{}", id) },
        "images": [{ "url": format!("https://i.scdn.co/image/{}", id), "height": 640, "width": 640 }]
    })
}

async fn top_artists(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record("/me/top/artists", &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    let items = match params.get("time_range").map(String::as_str) {
        Some("short_term") => vec![top_artist("a", &["lo-fi", "chillhop"])],
        Some("medium_term") => vec![top_artist("a", &["lo-fi"]), top_artist("b", &["jazz"])],
        _ => vec![top_artist("c", &["dub"])],
    };
    (StatusCode::OK, Json(json!({ "items": items })))
}

async fn top_tracks(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record("/me/top/tracks", &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    let items = match params.get("time_range").map(String::as_str) {
        Some("short_term") => vec![track("t1", 1000, "a"), track("t2", 1000, "a")],
        _ => Vec::new(),
    };
    (StatusCode::OK, Json(json!({ "items": items })))
}

async fn recently_played(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record("/me/player/recently-played", &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "track": track("r1", 180_000, "a"), "played_at": "2025-01-01T10:00:00Z" },
                { "track": track("r2", 200_000, "b"), "played_at": "2025-01-01T09:00:00Z" }
            ]
        })),
    )
}

async fn saved_tracks(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record("/me/tracks", &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [{ "track": track("s1", 240_000, "a"), "added_at": "2024-12-01T00:00:00Z" }]
        })),
    )
}

async fn playlists(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record("/me/playlists", &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "id": "mix", "name": "Mix", "tracks": { "total": 3 } },
                { "id": "empty", "name": "Nothing yet", "tracks": { "total": 0 } },
                { "id": "gone", "name": "Deleted", "tracks": { "total": 5 } }
            ]
        })),
    )
}

async fn playlist_tracks(
    State(log): State<Arc<Log>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    log.record(&format!("/playlists/{}/tracks", id), &params);
    if !authorized(&headers) {
        return unauthorized();
    }

    match id.as_str() {
        "mix" => (
            StatusCode::OK,
            Json(json!({
                "items": [
                    { "track": track("p1", 1, "a") },
                    { "track": null },
                    { "track": track("p2", 1, "b") }
                ]
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "status": 404, "message": "Not found." } })),
        ),
    }
}

/// Starts a stub of the user endpoints on a random local port.
async fn stub_server() -> (String, Arc<Log>) {
    let log = Arc::new(Log::default());
    let app = Router::new()
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/me/tracks", get(saved_tracks))
        .route("/v1/me/playlists", get(playlists))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .with_state(Arc::clone(&log));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1/", addr), log)
}

#[tokio::test]
async fn test_top_artists() {
    let (base, log) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "user-token");

    let artists = client.top_artists(500, TimeRange::Medium).await.unwrap();

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[1].id, "b");
    assert_eq!(artists[0].images[0].height, Some(640));

    let params = log.params_for("/me/top/artists");
    assert_eq!(params[0]["limit"], "50");
    assert_eq!(params[0]["time_range"], "medium_term");
}

#[tokio::test]
async fn test_library_endpoints() {
    let (base, log) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "user-token");

    let recent = client.recently_played(20).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].duration_ms, 180_000);
    assert_eq!(recent[0].artists[0].id.as_deref(), Some("a"));

    let saved = client.saved_tracks(0).await.unwrap();
    assert_eq!(saved[0].id.as_deref(), Some("s1"));
    assert_eq!(log.params_for("/me/tracks")[0]["limit"], "1");

    let playlists = client.playlists(50).await.unwrap();
    assert_eq!(playlists.len(), 3);
    assert_eq!(playlists[1].tracks.as_ref().map(|t| t.total), Some(0));
}

#[tokio::test]
async fn test_playlist_tracks_drop_removed_items() {
    let (base, log) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "user-token");

    let tracks = client.playlist_tracks("mix", 250).await.unwrap();

    let ids: Vec<_> = tracks.iter().filter_map(|t| t.id.as_deref()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(log.params_for("/playlists/mix/tracks")[0]["limit"], "100");
}

#[tokio::test]
async fn test_expired_token_maps_to_api_error() {
    let (base, _) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "stale-token");

    match client.top_tracks(10, TimeRange::Short).await {
        Err(HarvestError::Api { status, body }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("expired"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_activity_skips_unreadable_playlists() {
    let (base, log) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "user-token");

    let activity = profile::fetch_activity(&client).await.unwrap();

    assert_eq!(activity.playlist_tracks.len(), 2);
    assert_eq!(activity.recently_played.len(), 2);
    assert_eq!(activity.saved_tracks.len(), 1);

    // Empty playlists are not requested
    assert!(log.params_for("/playlists/empty/tracks").is_empty());
    assert_eq!(log.params_for("/playlists/gone/tracks").len(), 1);
}

#[tokio::test]
async fn test_collect_profile() {
    let (base, log) = stub_server().await;
    let client = SpotifyUserClient::with_api_url(base, "user-token");

    let profile = profile::collect_profile(&client).await.unwrap();

    let ranges: Vec<TimeRange> = profile.ranges.iter().map(|(r, _)| *r).collect();
    assert_eq!(ranges, TIME_RANGES.to_vec());

    let short = profile.range(TimeRange::Short).unwrap();
    let a = &short.artists[0].statistics;
    assert_eq!(a.playlist_appearances, 1);
    assert_eq!(a.recent_plays, 1);
    assert_eq!(a.saved_tracks, 1);
    assert_eq!(a.total_listening_time, 180_000);
    assert_eq!(a.appears_in_top_tracks, 2);
    assert_eq!(short.metadata.most_common_genres.0[0], ("lo-fi".to_string(), 1));

    let medium = profile.range(TimeRange::Medium).unwrap();
    assert_eq!(medium.metadata.total_artists, 2);
    assert_eq!(medium.artists[1].statistics.recent_plays, 1);
    assert_eq!(medium.artists[0].statistics.appears_in_top_tracks, 0);

    assert_eq!(log.params_for("/me/top/tracks").len(), 3);
}
