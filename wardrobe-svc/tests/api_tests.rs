//! HTTP API integration tests
//!
//! Drives the router directly with tower's `oneshot`, no listening socket.
//! The stylist is unkeyed in these tests, so compose responses carry the
//! fixed fallback analysis and no visualization.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use wardrobe_svc::services::StylistClient;
use wardrobe_svc::store::ItemStore;
use wardrobe_svc::AppState;

async fn test_app(dir: &TempDir) -> axum::Router {
    let pool = wardrobe_common::db::init_pool(&dir.path().join("wardrobe.db"))
        .await
        .unwrap();
    let store = Arc::new(ItemStore::new(pool.clone(), dir.path()));
    store.initialize().await;
    let stylist = Arc::new(StylistClient::new().unwrap());
    wardrobe_svc::build_router(AppState::new(pool, store, stylist))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn write_source_image(dir: &TempDir, file_name: &str) -> String {
    let path = dir.path().join(file_name);
    fs::write(&path, b"\xFF\xD8\xFF\xE0fake-jpeg-bytes").unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "wardrobe-svc");
}

#[tokio::test]
async fn test_add_and_list_items() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;
    let source = write_source_image(&dir, "dunk.jpg");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items",
            json!({"source_path": source, "name": "Nike Dunk", "category": "Shoe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Nike Dunk");
    assert_eq!(created["category"], "Shoe");
    assert!(!created["id"].as_str().unwrap().is_empty());

    let response = app
        .oneshot(Request::get("/api/items").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items = body_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_add_item_validation_happens_before_ingestion() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;
    let source = write_source_image(&dir, "ok.jpg");

    // Blank name
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items",
            json!({"source_path": source, "name": "   ", "category": "Shoe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unreadable source image
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items",
            json!({"source_path": "/no/such/file.jpg", "name": "Ghost", "category": "Shoe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing reached the store
    let response = app
        .oneshot(Request::get("/api/items").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let items = body_json(response).await;
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_selection_flow_with_fallback_analysis() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Catalog one item per wearable category
    let mut ids = Vec::new();
    for (name, category) in [
        ("Tee", "Upper Wear"),
        ("Jeans", "Bottom Wear"),
        ("Dunk", "Shoe"),
    ] {
        let source = write_source_image(&dir, &format!("{}.jpg", name));
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/items",
                json!({"source_path": source, "name": name, "category": category}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["id"].as_str().unwrap().to_string());
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/selection/enter", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for id in &ids {
        let response = app
            .clone()
            .oneshot(post_json("/api/selection/toggle", json!({"item_id": id})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/selection/compose", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    // Ordered Upper -> Bottom -> Shoe
    let outfit = body["outfit"].as_array().unwrap();
    assert_eq!(outfit.len(), 3);
    let categories: Vec<&str> = outfit
        .iter()
        .map(|i| i["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Upper Wear", "Bottom Wear", "Shoe"]);

    // No stylist key configured: fixed fallback, no visualization
    assert_eq!(body["analysis"]["title"], "Classic Mix");
    assert_eq!(body["analysis"]["score"], 8.0);
    assert_eq!(body["visualization"], Value::Null);

    // Compose cleared the session
    let response = app
        .oneshot(Request::get("/api/selection").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let selection = body_json(response).await;
    assert_eq!(selection["selecting"], false);
    assert_eq!(selection["can_compose"], false);
}

#[tokio::test]
async fn test_toggle_unknown_item_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    app.clone()
        .oneshot(post_json("/api/selection/enter", json!({})))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/selection/toggle",
            json!({"item_id": "00000000-0000-0000-0000-000000000000"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compose_outside_selection_mode_conflicts() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(post_json("/api/selection/compose", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Selecting but empty: bad request
    app.clone()
        .oneshot(post_json("/api/selection/enter", json!({})))
        .await
        .unwrap();
    let response = app
        .oneshot(post_json("/api/selection/compose", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_stylist_api_key() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(post_json("/api/settings/stylist_api_key", json!({"api_key": "  "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/settings/stylist_api_key",
            json!({"api_key": "test-key-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}
