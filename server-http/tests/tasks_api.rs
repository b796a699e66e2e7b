//! Router-level tests: requests are driven straight through the axum `Router`
//! with `tower::ServiceExt::oneshot`, no sockets involved.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use server_http::{build_app, App, AppState};
use shared::config::Config;
use std::sync::Arc;
use std::time::Duration;
use storage_engine::JsonFileStore;
use tower::ServiceExt;

fn app_with_store(store: Arc<JsonFileStore>) -> App {
    let state = AppState::new(store, Duration::from_secs(3600));
    build_app(state, &Config::default())
}

fn app() -> App {
    app_with_store(Arc::new(JsonFileStore::in_memory()))
}

async fn send(
    app: &App,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    match body {
        Some(body) => send_raw(app, method, uri, token, Some("application/json"), body.to_string()).await,
        None => send_raw(app, method, uri, token, None, String::new()).await,
    }
}

/// Sends `body` verbatim, with `content_type` if given
async fn send_raw(
    app: &App,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let request = builder.body(Body::from(body)).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn signup(app: &App, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_list_create_list_scenario() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some(json!({ "title": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["task"]["id"], 1);
    assert_eq!(body["task"]["status"], "TODO");
    assert!(body["task"].get("user_id").is_none());

    // miss: fetched from the store and cached
    let (status, first) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["fromCache"], false);
    assert_eq!(first["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(first["tasks"][0]["title"], "a");

    // hit: identical payload
    let (_, second) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(second["fromCache"], true);
    assert_eq!(second["tasks"], first["tasks"]);

    // creating a task invalidates the listing
    send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some(json!({ "title": "b", "status": "IN_PROGRESS" })),
    )
    .await;

    let (_, third) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(third["fromCache"], false);
    let titles: Vec<&str> = third["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["b", "a"]);
}

#[tokio::test]
async fn test_update_and_delete_invalidate() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;
    send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": "a" }))).await;
    send(&app, Method::GET, "/api/tasks", Some(&token), None).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/tasks/1",
        Some(&token),
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["status"], "DONE");
    assert_eq!(body["task"]["title"], "a");

    let (_, listing) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(listing["fromCache"], false);
    assert_eq!(listing["tasks"][0]["status"], "DONE");

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");

    let (_, listing) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(listing["fromCache"], false);
    assert!(listing["tasks"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

#[tokio::test]
async fn test_task_validation_messages() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;

    let (status, body) = send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some(json!({ "title": "a", "status": "BLOCKED" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    // unknown task is reported before an empty patch
    let (status, _) = send(&app, Method::PATCH, "/api/tasks/42", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": "a" }))).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/tasks/1",
        Some(&token),
        Some(json!({ "status": "BLOCKED", "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid fields to update");
}

#[tokio::test]
async fn test_users_cannot_touch_each_others_tasks() {
    let app = app();
    let ada = signup(&app, "ada@example.com").await;
    let bob = signup(&app, "bob@example.com").await;

    send(&app, Method::POST, "/api/tasks", Some(&ada), Some(json!({ "title": "ada's" }))).await;

    let (_, listing) = send(&app, Method::GET, "/api/tasks", Some(&bob), None).await;
    assert!(listing["tasks"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::PATCH, "/api/tasks/1", Some(&bob), Some(json!({ "title": "mine now" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/tasks/1", Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(&app, Method::GET, "/api/tasks", Some(&ada), None).await;
    assert_eq!(listing["tasks"][0]["title"], "ada's");
}

#[tokio::test]
async fn test_requests_without_valid_token_are_rejected() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, Method::GET, "/api/tasks", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_login_logout() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "ada@example.com", "password": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters");

    let (status, body) = send(&app, Method::POST, "/api/auth/signup", None, Some(json!({ "email": "ada@example.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");

    signup(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["email"], "ada@example.com");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_calls_are_logged_and_viewable() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::open(temp_dir.path().join("database.json")).await.unwrap());
    let app = app_with_store(store);

    let token = signup(&app, "ada@example.com").await;
    send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": "a" }))).await;
    send(&app, Method::GET, "/api/tasks", None, None).await;
    send(&app, Method::GET, "/health", None, None).await;

    let (status, body) = send(&app, Method::GET, "/api/view-db", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalUsers"], 1);
    assert_eq!(body["stats"]["totalTasks"], 1);
    assert!(body["users"][0].get("password_hash").is_none());

    // signup, create, unauthorized list; /health is not an API call
    let logs = body["recentLogs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(body["stats"]["totalLogs"], 3);
    assert_eq!(logs[0]["path"], "/api/tasks");
    assert_eq!(logs[0]["status_code"], 401);
    assert!(logs[0]["user_id"].is_null());
    assert_eq!(logs[1]["method"], "POST");
    assert_eq!(logs[1]["user_id"], 1);
    assert_eq!(logs[2]["path"], "/api/auth/signup");
    assert_eq!(logs[2]["status_code"], 201);
    assert_eq!(logs[2]["user_id"], 1);
}

#[tokio::test]
async fn test_unreadable_bodies_get_json_errors() {
    let app = app();

    let (status, body) = send_raw(&app, Method::POST, "/api/auth/signup", None, None, String::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some("application/json"),
        "{\"email\": ".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");

    let token = signup(&app, "ada@example.com").await;

    let (status, body) = send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": 42 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some("text/plain"),
        "buy milk".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    send(&app, Method::POST, "/api/tasks", Some(&token), Some(json!({ "title": "a" }))).await;
    let (status, body) = send_raw(&app, Method::PATCH, "/api/tasks/1", Some(&token), None, String::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid fields to update");
}

#[tokio::test]
async fn test_non_numeric_task_id_is_not_found() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;

    let (status, body) = send(&app, Method::PATCH, "/api/tasks/abc", Some(&token), Some(json!({ "status": "DONE" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

#[tokio::test]
async fn test_trailing_slash_reaches_route() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/tasks/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fromCache"], false);

    let (status, _) = send(&app, Method::GET, "/health/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_password_is_logged_against_the_account() {
    let app = app();
    let token = signup(&app, "ada@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, Method::GET, "/api/view-db", Some(&token), None).await;
    let logs = body["recentLogs"].as_array().unwrap();
    assert_eq!(logs[0]["status_code"], 401);
    assert!(logs[0]["user_id"].is_null(), "unknown email has no account");
    assert_eq!(logs[1]["status_code"], 401);
    assert_eq!(logs[1]["user_id"], 1);
}

#[tokio::test]
async fn test_concurrent_duplicate_signups_create_one_account() {
    let app = app();
    let request = |app: App| async move {
        send(
            &app,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "email": "dup@example.com", "password": "secret1" })),
        )
        .await
    };

    let (first, second) = tokio::join!(request(app.clone()), request(app.clone()));
    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
}
