//! HTTP API tests
//!
//! Drive the router directly with `oneshot`, backed by an in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

use vecstore::server::{router, AppState};
use vecstore::VectorStore;

fn test_app() -> (Router, Arc<AppState>) {
    let state = AppState::new(VectorStore::open_in_memory().unwrap());
    (router(Arc::clone(&state)), state)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_vector(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_root_is_alive() {
    let (app, _) = test_app();

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_vector_returns_201() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_vector(
            "/vectors/",
            json!({"dimensions": [5, 1, 9], "color": "red", "shape": "circle"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["dimensions"], json!([5, 1, 9]));
    assert_eq!(body["color"], "red");
    assert_eq!(body["shape"], "circle");
    assert_eq!(body["length"], 3);
    assert!(body["creation_timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_created_vector_can_be_fetched() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_vector(
            "/vectors",
            json!({"dimensions": [1, 2, 3, 4, 5], "color": "green", "shape": "square"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response.into_body()).await;

    let response = app.oneshot(get("/vectors/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["id"], 1);
    assert_eq!(fetched["dimensions"], json!([1, 2, 3, 4, 5]));
    assert_eq!(fetched["color"], "green");
    assert_eq!(fetched["creation_timestamp"], created["creation_timestamp"]);
}

#[tokio::test]
async fn test_fetched_short_vector_is_padded() {
    let (app, _) = test_app();

    app.clone()
        .oneshot(post_vector(
            "/vectors/",
            json!({"dimensions": [3, 7], "color": "blue", "shape": "triangle"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/vectors/1")).await.unwrap();
    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["dimensions"], json!([3, 7, 0, 0, 0]));
}

#[tokio::test]
async fn test_unknown_vector_returns_404() {
    let (app, _) = test_app();

    let response = app.oneshot(get("/vectors/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn test_non_integer_dimensions_are_rejected() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_vector(
            "/vectors/",
            json!({"dimensions": [1.5, 2], "color": "red", "shape": "circle"}),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let (app, state) = test_app();
    state.store.lock().unwrap().close().unwrap();

    let response = app
        .oneshot(post_vector(
            "/vectors/",
            json!({"dimensions": [1], "color": "red", "shape": "circle"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Internal server error");
}
