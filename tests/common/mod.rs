use axum::body::Body;
use axum::http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use billboard_market::{build_app, config::Settings, AppState};

/// A fully wired app over a fixed-seed catalog. The temp dir holds the
/// session file and must outlive the app.
pub fn build_test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = dir.path().join("session.json").to_string_lossy().into_owned();
    let app = build_app(AppState::seeded(Settings::for_tests(store)));
    (app, dir)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

/// Logs a seeded account in and returns its bearer token.
pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Registers a fresh owner account and returns its bearer token.
pub async fn register_owner(app: &Router, email: &str) -> String {
    let form = serde_json::json!({
        "email": email,
        "password": "s3cret",
        "fullName": "Second Owner",
        "userType": "owner",
        "phone": "+919822222222"
    });
    let (status, body) = send(app, Method::POST, "/api/auth/register", None, Some(form)).await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

pub fn new_listing(owner_id: &str) -> Value {
    serde_json::json!({
        "ownerId": owner_id,
        "title": "Digital Hoarding at Magarpatta",
        "description": "Facing the IT park exit",
        "location": {
            "latitude": 18.5158,
            "longitude": 73.9272,
            "address": "21 Main Road, Magarpatta",
            "city": "Pune",
            "state": "Maharashtra"
        },
        "dimensions": { "width": 40, "height": 20, "unit": "ft" },
        "pricePerDay": 21000,
        "lighting": "both",
        "images": [{ "kind": "remote", "value": "https://img.example/m.png" }],
        "type": "digital",
        "features": ["LED"],
        "minBookingDays": 1,
        "estimatedDailyImpressions": 30000
    })
}
