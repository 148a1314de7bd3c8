use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use fright_shared::clients::db::create_lazy_pool;
use fright_shared::middleware::detached_metrics;
use fright_user::config::AppConfig;
use fright_user::{router, AppState};

fn app() -> Router {
    let config = AppConfig::default();
    let state = AppState {
        db: create_lazy_pool(&config.database_url, 1),
        config,
        metrics_handle: detached_metrics(),
    };
    router(Arc::new(state))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!(code), "{body}");
}

#[tokio::test]
async fn malformed_user_id_is_bad_request() {
    let (status, body) = send(get("/users/not-a-uuid/friends")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0008");
}

#[tokio::test]
async fn malformed_target_id_is_bad_request() {
    let uri = format!("/users/{}/movie-watchlist/nope", Uuid::now_v7());
    let request = Request::builder().method(Method::POST).uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0008");
}

#[tokio::test]
async fn unblock_only_answers_delete() {
    let uri = format!("/users/{}/unblock/{}", Uuid::now_v7(), Uuid::now_v7());
    let request = Request::builder().method(Method::POST).uri(uri).body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = send(post_json("/users", "{\"name\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0008");
}

#[tokio::test]
async fn registration_is_validated_before_touching_the_database() {
    let payload = json!({
        "name": "Nancy Thompson",
        "username": "nancy thompson",
        "email": "nancy-at-elm-street",
        "password": "freddy1984",
        "age": 9,
    });
    let (status, body) = send(post_json("/users", &payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0002");
    let details = &body["error"]["details"];
    assert!(details.get("username").is_some(), "{details}");
    assert!(details.get("email").is_some(), "{details}");
    assert!(details.get("age").is_some(), "{details}");
}

#[tokio::test]
async fn off_step_rating_is_rejected() {
    let payload = json!({
        "content_id": Uuid::now_v7(),
        "content_type": "movie",
        "rating": 4.2,
    });
    let uri = format!("/users/{}/ratings", Uuid::now_v7());
    let (status, body) = send(post_json(&uri, &payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0002");
    assert!(body["error"]["details"].get("rating").is_some());
}

#[tokio::test]
async fn unknown_content_type_is_bad_request() {
    let payload = json!({
        "content_id": Uuid::now_v7(),
        "content_type": "radio",
        "rating": 4.0,
    });
    let uri = format!("/users/{}/ratings", Uuid::now_v7());
    let (status, body) = send(post_json(&uri, &payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0008");
}

#[tokio::test]
async fn invalid_ratings_query_is_bad_request() {
    let uri = format!("/users/{}/ratings?content_type=radio", Uuid::now_v7());
    let (status, body) = send(get(&uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "E0008");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let response = app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
