//! End-to-end smoke tests for the full devicesd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repo,
//! real service, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use devices_adapter_http_axum::router;
use devices_adapter_http_axum::state::AppState;
use devices_adapter_storage_sqlite_sqlx::{Config, SqliteDeviceRepository};
use devices_app::services::device_service::DeviceService;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let repo = SqliteDeviceRepository::new(db.pool().clone());
    router::build(AppState::new(DeviceService::new(repo)))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &axum::Router, name: &str, brand: &str, state: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/devices",
        Some(serde_json::json!({ "name": name, "brand": brand, "state": state })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn urlencode(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                char::from(b).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect()
}

fn id_of(device: &Value) -> String {
    device["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn should_serve_openapi_document() {
    let app = app().await;
    let (status, doc) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Devices API");
    assert!(doc["paths"]["/api/devices"]["post"].is_object());
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_available_device_with_fresh_id_and_timestamp() {
    let app = app().await;

    let device = create(&app, "Sensor", "Acme", "Available").await;

    assert_eq!(device["name"], "Sensor");
    assert_eq!(device["brand"], "Acme");
    assert_eq!(device["state"], "Available");
    assert!(device["created_at"].as_str().is_some());

    let uri = format!("/api/devices/{}", id_of(&device));
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, device);
}

#[tokio::test]
async fn should_return_location_of_created_device() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/devices")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Sensor","brand":"Acme","state":"Available"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()["location"].to_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Sensor");
}

#[tokio::test]
async fn should_complete_full_crud_cycle() {
    let app = app().await;
    let device = create(&app, "Sensor", "Acme", "available").await;
    let uri = format!("/api/devices/{}", id_of(&device));

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(serde_json::json!({ "name": "Thermometer", "brand": "Globex" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Thermometer");
    assert_eq!(updated["brand"], "Globex");
    assert_eq!(updated["state"], "Available");
    assert_eq!(updated["created_at"], device["created_at"]);

    let (status, list) = send(&app, "GET", "/api/devices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_empty_list_when_no_devices() {
    let app = app().await;
    let (status, list) = send(&app, "GET", "/api/devices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_device() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/devices/00000000-0000-4000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn should_return_not_found_when_updating_unknown_device() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "PUT",
        "/api/devices/00000000-0000-4000-8000-000000000000",
        Some(serde_json::json!({ "state": "Inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Lifecycle rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_lock_name_and_brand_while_in_use() {
    let app = app().await;
    let device = create(&app, "Sensor", "Acme", "InUse").await;
    let uri = format!("/api/devices/{}", id_of(&device));

    let patch = serde_json::json!({ "name": "Other" });
    let (status, body) = send(&app, "PUT", &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "name-locked");

    let patch = serde_json::json!({ "brand": "Globex" });
    let (status, body) = send(&app, "PUT", &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "brand-locked");

    let (_, stored) = send(&app, "GET", &uri, None).await;
    assert_eq!(stored["name"], "Sensor");
    assert_eq!(stored["brand"], "Acme");
    assert_eq!(stored["state"], "InUse");
}

#[tokio::test]
async fn should_not_apply_partial_update_when_rule_refuses() {
    let app = app().await;
    let device = create(&app, "Sensor", "Acme", "InUse").await;
    let uri = format!("/api/devices/{}", id_of(&device));

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(serde_json::json!({ "name": "Other", "state": "Inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, "GET", &uri, None).await;
    assert_eq!(stored["state"], "InUse");
}

#[tokio::test]
async fn should_release_in_use_device_by_changing_state() {
    let app = app().await;
    let device = create(&app, "Sensor", "Acme", "InUse").await;
    let uri = format!("/api/devices/{}", id_of(&device));

    let patch = serde_json::json!({ "state": "Inactive" });
    let (status, updated) = send(&app, "PUT", &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["state"], "Inactive");

    let patch = serde_json::json!({ "name": "Renamed" });
    let (status, _) = send(&app, "PUT", &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_refuse_delete_of_in_use_device() {
    let app = app().await;
    let device = create(&app, "Sensor", "Acme", "InUse").await;
    let uri = format!("/api/devices/{}", id_of(&device));

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "in-use-undeletable");

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_devices_by_brand_ignoring_case() {
    let app = app().await;
    create(&app, "A", "Acme", "Available").await;
    create(&app, "B", "ACME", "InUse").await;
    create(&app, "C", "Globex", "Available").await;

    let (status, list) = send(&app, "GET", "/api/devices/brand/acme", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["A", "B"]);

    let (_, list) = send(&app, "GET", "/api/devices/brand/Initech", None).await;
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn should_list_devices_by_non_ascii_brand_ignoring_case() {
    let app = app().await;
    create(&app, "Octavia", "Škoda", "Available").await;

    for brand in ["škoda", "ŠKODA", "Škoda"] {
        let uri = format!("/api/devices/brand/{}", urlencode(brand));
        let (status, list) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1, "brand {brand}");
    }
}

#[tokio::test]
async fn should_list_devices_by_state() {
    let app = app().await;
    create(&app, "A", "Acme", "Available").await;
    create(&app, "B", "Acme", "InUse").await;
    create(&app, "C", "Acme", "Inactive").await;

    let (status, list) = send(&app, "GET", "/api/devices/state/inuse", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "B");
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_unknown_state_on_create() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/devices",
        Some(serde_json::json!({ "name": "A", "brand": "Acme", "state": "Broken" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid state: Broken");

    let (_, list) = send(&app, "GET", "/api/devices", None).await;
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn should_reject_create_without_state_as_bad_request() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/devices",
        Some(serde_json::json!({ "name": "Sensor", "brand": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("state"));
}

#[tokio::test]
async fn should_reject_unknown_state_on_filter() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/devices/state/Sleeping", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid state: Sleeping");
}

#[tokio::test]
async fn should_reject_blank_name_on_create() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/devices",
        Some(serde_json::json!({ "name": "  ", "brand": "Acme", "state": "Available" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_malformed_id() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/api/devices/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
