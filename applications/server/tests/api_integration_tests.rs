/// API integration tests
/// Tests complete HTTP request/response cycles against real MP3 files
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{itunes_hit, silent_mp3, test_state, FakeCatalog, OfflineCatalog};
use serde_json::{json, Value};
use songinfo_core::{SaveFields, TagStore};
use songinfo_metadata::LoftyTagStore;
use songinfo_server::create_router;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn app_with(catalog: Arc<FakeCatalog>) -> Router {
    create_router(test_state(catalog))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test GET /api/health
#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

/// Test lookup of a file that does not exist
#[tokio::test]
async fn test_lookup_missing_file() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/lookup",
            json!({ "filepath": "/no/such/song.mp3" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "File not found. Please check the path.");
    assert_eq!(body["success"], false);
}

/// Test lookup rejects non-MP3 files
#[tokio::test]
async fn test_lookup_wrong_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/lookup",
            json!({ "filepath": path.to_string_lossy() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid file type. Only MP3 files are allowed."
    );
}

/// Test lookup with a blank path
#[tokio::test]
async fn test_lookup_blank_path() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(json_request("POST", "/api/lookup", json!({ "filepath": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test lookup returns normalized candidates and issues a session cookie
#[tokio::test]
async fn test_lookup_returns_candidates() {
    let dir = TempDir::new().unwrap();
    let path = silent_mp3(&dir, "track02.mp3");
    LoftyTagStore::new()
        .write_tags(
            &path,
            &SaveFields {
                title: "Roygbiv".into(),
                artist: "Boards of Canada".into(),
                ..SaveFields::default()
            },
        )
        .unwrap();

    let catalog = Arc::new(FakeCatalog::new(vec![
        itunes_hit("Roygbiv"),
        itunes_hit("Aquarius"),
    ]));
    let app = app_with(Arc::clone(&catalog));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/lookup",
            json!({ "filepath": path.to_string_lossy() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    let body = body_json(response).await;
    assert_eq!(body["metadata"]["title"], "Roygbiv");
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["year"], "1998");
    assert_eq!(
        body["results"][0]["thumbnailUrl"],
        "https://is1.example.com/art/1000x1000bb.jpg"
    );
    assert_eq!(
        *catalog.last_terms.lock().unwrap(),
        vec!["Roygbiv".to_string(), "Boards of Canada".to_string()]
    );
}

/// Test lookup applies submitted edits before searching
#[tokio::test]
async fn test_lookup_with_edits() {
    let dir = TempDir::new().unwrap();
    let path = silent_mp3(&dir, "untagged.mp3");
    let catalog = Arc::new(FakeCatalog::new(vec![itunes_hit("Telephasic Workshop")]));
    let app = app_with(Arc::clone(&catalog));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/lookup",
            json!({
                "filepath": path.to_string_lossy(),
                "fields": { "title": "Telephasic Workshop", "mood": "calm" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["metadata"]["title"], "Telephasic Workshop");
    assert_eq!(body["unknownFields"], json!(["mood"]));
    assert_eq!(
        *catalog.last_terms.lock().unwrap(),
        vec!["Telephasic Workshop".to_string()]
    );
}

/// Test lookup when the catalog cannot be reached
#[tokio::test]
async fn test_lookup_offline() {
    let dir = TempDir::new().unwrap();
    let path = silent_mp3(&dir, "song.mp3");
    let app = create_router(test_state(Arc::new(OfflineCatalog)));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/lookup",
            json!({ "filepath": path.to_string_lossy() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"], "No internet connection.");
}

/// Test save writes merged tags and embeds the thumbnail
#[tokio::test]
async fn test_save_writes_tags() {
    let dir = TempDir::new().unwrap();
    let path = silent_mp3(&dir, "song.mp3");
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/save",
            json!({
                "filepath": path.to_string_lossy(),
                "fields": {
                    "title": "Olson",
                    "artist": "Boards of Canada",
                    "date": "1998-04-20T07:00:00Z",
                    "genre": ""
                },
                "thumbnailUrl": "https://is1.example.com/art/1000x1000bb.jpg"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["artwork"]["status"], "embedded");
    assert_eq!(body["metadata"]["title"], "Olson");
    assert_eq!(body["metadata"]["year"], "1998");

    let store = LoftyTagStore::new();
    let record = store.read_tags(&path).unwrap();
    assert_eq!(record.artist.as_deref(), Some("Boards of Canada"));
    assert_eq!(record.genre.as_deref(), Some(""));
    assert!(store.read_artwork(&path).unwrap().is_some());
}

/// Test save of a missing file
#[tokio::test]
async fn test_save_missing_file() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/save",
            json!({ "filepath": "/no/such/song.mp3", "fields": { "title": "x" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test results limit persists per session cookie
#[tokio::test]
async fn test_settings_per_session() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings",
            json!({ "resultsLimit": "3" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert_eq!(body_json(response).await["resultsLimit"], 3);

    // Same session sees the stored value
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["resultsLimit"], 3);

    // A new session gets the default
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["resultsLimit"], 5);
}

/// Test invalid limits fall back to the default
#[tokio::test]
async fn test_settings_invalid_limit() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![])));

    for bad in [json!(0), json!(-4), json!("lots"), json!(null)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/settings",
                json!({ "resultsLimit": bad }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["resultsLimit"], 5);
    }
}

/// Test the session limit is used for searches
#[tokio::test]
async fn test_lookup_uses_session_limit() {
    let dir = TempDir::new().unwrap();
    let path = silent_mp3(&dir, "song.mp3");
    let catalog = Arc::new(FakeCatalog::new(vec![
        itunes_hit("A"),
        itunes_hit("B"),
        itunes_hit("C"),
    ]));
    let app = app_with(Arc::clone(&catalog));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings",
            json!({ "resultsLimit": 1 }),
        ))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let mut request = json_request(
        "POST",
        "/api/lookup",
        json!({ "filepath": path.to_string_lossy(), "fields": { "title": "A" } }),
    );
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(body_json(response).await["results"].as_array().unwrap().len(), 1);
    assert_eq!(*catalog.last_limit.lock().unwrap(), Some(1));
}

/// Test artist lookup passes through raw catalog entries
#[tokio::test]
async fn test_artist_music() {
    let app = app_with(Arc::new(FakeCatalog::new(vec![itunes_hit("Kaini Industries")])));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/artists/42/music")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["artistId"], "42");
    assert_eq!(body["results"][0]["trackName"], "Kaini Industries");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/artists/7/music")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
