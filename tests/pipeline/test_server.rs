use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sharecurve::server::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

use crate::common::fixture;

fn app() -> Router {
    router(Arc::new(AppState::new(Arc::new(fixture()))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_text(app, method, uri, body.map(|body| body.to_string())).await
}

/// Every response body, errors included, must be empty or JSON
async fn send_text(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body)),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_and_dataset_info() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, "GET", "/api/dataset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rawRows"], 10);
    assert_eq!(body["doctors"], 8);
    assert_eq!(body["sampleTotal"], 150.0);
}

#[tokio::test]
async fn stateless_curve() {
    let app = app();
    let request = json!({
        "filters": { "class": ["Statins"], "quarter": null },
        "brands": ["Crestor", "Prestarium"]
    });

    let (status, body) = send(&app, "POST", "/api/curve", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docCount"], 4);
    assert_eq!(body["sampleTotal"], 70.0);
    assert_eq!(body["validatedSelection"], json!(["Crestor"]));
    assert_eq!(body["facetOptions"]["brand"], json!(["Atoris", "Crestor"]));
    assert_eq!(body["curve"]["kind"], "partitioned");
    assert_eq!(body["curve"]["partitions"][0]["brand"], "Crestor");
    assert_eq!(
        body["curve"]["partitions"][0]["series"]["points"],
        json!([[1.0, 1.0]])
    );
}

#[tokio::test]
async fn empty_request_body_fields_default() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/curve", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docCount"], 8);
    assert_eq!(body["curve"]["kind"], "single");
    assert_eq!(body["validatedSelection"], json!([]));
}

#[tokio::test]
async fn session_round_trip() {
    let app = app();

    let (status, created) = send(&app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["snapshot"]["generation"], 1);
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/sessions/{id}");

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "brands": ["Enap", "Atoris"] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"], 2);
    assert_eq!(body["validatedSelection"], json!(["Enap", "Atoris"]));

    let (_, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "filters": { "class": ["Statins"] } })),
    )
    .await;
    assert_eq!(body["validatedSelection"], json!(["Atoris"]));

    let (_, body) = send(&app, "POST", &uri, Some(json!({ "brands": null }))).await;
    assert_eq!(body["validatedSelection"], json!([]));
    assert_eq!(body["curve"]["kind"], "single");
    assert_eq!(body["docCount"], 4);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn malformed_session_id_is_a_json_error() {
    let app = app();
    for method in ["POST", "DELETE"] {
        let body = (method == "POST").then(|| json!({}));
        let (status, body) = send(&app, method, "/api/sessions/not-a-uuid", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let app = app();
    let (status, body) = send_text(&app, "POST", "/api/curve", Some("{\"filters\": ".to_string())).await;
    assert!(status.is_client_error());
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "POST", "/api/curve", Some(json!({ "brands": "Atoris" }))).await;
    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}
