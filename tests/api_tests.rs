use std::{collections::HashSet, sync::Arc};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use multipage_app_rust::{
    config::Config,
    quiz::{Catalog, QuizSession},
    server::build_router,
    state::AppState,
    store::{RecordStore, IN_MEMORY},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    let config = Config {
        database_path: IN_MEMORY.to_string(),
        ..Config::default()
    };

    AppState::from_parts(
        config,
        RecordStore::open_in_memory().unwrap(),
        QuizSession::new(Catalog::builtin()),
    )
}

fn app() -> Router {
    build_router(test_state())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_root_is_alive() {
    let (status, body) = send(&app(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = app();

    let (status, created) = send(
        &app,
        post(
            "/items",
            json!({"name": "My Awesome Item", "description": "Does amazing things."}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Item created successfully");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, items) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        items,
        json!([{"_id": id, "name": "My Awesome Item", "description": "Does amazing things."}])
    );

    let (status, _) = send(&app, delete(&format!("/items/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, delete(&format!("/items/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_item_validation_failures() {
    let app = app();

    let (status, body) = send(&app, post("/items", json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("name"));

    let (status, _) = send(&app, post("/items", json!({"description": "no name"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        post("/items", json!({"name": "x", "description": "d".repeat(501)})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, items) = send(&app, get("/items")).await;
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn test_malformed_item_id_is_bad_request() {
    let (status, _) = send(&app(), delete("/items/not-a-real-id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = app();
    let user = json!({"username": "coder123", "bio": "Loves coding and solving problems."});

    let (status, created) = send(&app, post("/users", user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());

    let (status, body) = send(&app, post("/users", user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "user already exists");

    let (_, users) = send(&app, get("/users")).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["username"], "coder123");
}

#[tokio::test]
async fn test_user_delete() {
    let app = app();
    let (_, created) = send(&app, post("/users", json!({"username": "coder123"}))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, delete(&format!("/users/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, body) = send(&app, delete(&format!("/users/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_quiz_cycle_covers_catalog() {
    let app = app();
    let mut seen = HashSet::new();

    for _ in 0..5 {
        let (status, question) = send(&app, get("/quiz/question?previous_id=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(question["total_questions"], 5);
        assert!(question.get("correct").is_none());
        seen.insert(question["id"].as_i64().unwrap());
    }

    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn test_quiz_scoring_and_high_score() {
    let app = app();

    let (status, first) = send(
        &app,
        post("/quiz/answer", json!({"id": 1, "answer": "ls", "score": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({"is_correct": true, "correct_answer": "ls", "score": 10, "high_score": 10})
    );

    let (_, second) = send(
        &app,
        post("/quiz/answer", json!({"id": 2, "answer": "cat", "score": 10})),
    )
    .await;
    assert_eq!(
        second,
        json!({"is_correct": false, "correct_answer": "grep", "score": 10, "high_score": 10})
    );

    let (_, high) = send(&app, get("/quiz/highscore")).await;
    assert_eq!(high, json!({"high_score": 10}));

    let (status, reset) = send(&app, post("/quiz/reset", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reset["status"], "Quiz reset successfully");

    let (_, high) = send(&app, get("/quiz/highscore")).await;
    assert_eq!(high, json!({"high_score": 10}));
}

#[tokio::test]
async fn test_unknown_question_is_not_a_server_error() {
    let (status, body) = send(
        &app(),
        post("/quiz/answer", json!({"id": 404, "answer": "ls", "score": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "invalid question id"}));
}

#[tokio::test]
async fn test_malformed_answer_is_rejected_at_the_boundary() {
    let (status, body) = send(
        &app(),
        post("/quiz/answer", json!({"id": "one", "answer": 3})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_analytics_with_users_only() {
    let app = app();
    send(&app, post("/users", json!({"username": "alice"}))).await;
    send(&app, post("/users", json!({"username": "bob_the_builder"}))).await;

    let (status, report) = send(&app, get("/analytics")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["stats"]["item_count"], 0);
    assert_eq!(report["stats"]["avg_item_name_length"], 0.0);
    assert_eq!(report["stats"]["max_item_name_length"], 0);
    assert_eq!(report["stats"]["user_count"], 2);
    assert_eq!(report["stats"]["avg_user_username_length"], 10.0);
    assert_eq!(report["stats"]["max_user_username_length"], 15);
    assert!(report["plot"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_cors_preflight_from_file_page() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/items/abc")
        .header(header::ORIGIN, "null")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "null");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
}

#[tokio::test]
async fn test_cors_ignores_unlisted_origin() {
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
