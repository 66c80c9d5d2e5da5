//! Integration tests for the User Registry
//!
//! These tests drive the router the way the browser page does: form posts
//! followed by reads of the page and the JSON listing.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use user_registry::constants::{MSG_BUSY, MSG_EMAIL_REGISTERED, MSG_REGISTERED};
use user_registry::{open_database, routes, AppState, Config};

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration
fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_path: temp_dir.path().join("test.redb").display().to_string(),
        notification_ttl_ms: 60_000,
        environment: "test".to_string(),
        log_requests: false,
    }
}

/// Create application state over a fresh database in a temporary directory
fn create_test_state(temp_dir: &TempDir) -> AppState {
    let config = test_config(temp_dir);
    let db = open_database(&config.database_path).expect("Failed to create test database");
    AppState::new(db, config)
}

/// Create a test app router
fn create_test_app(state: &AppState) -> Router {
    routes::router(state.clone())
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read response body as text
async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a POST request with a urlencoded form body
fn make_form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a GET request
fn make_get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Post a form and check it redirects back to the page
async fn post_form(app: &Router, uri: &str, body: &str) {
    let response = app
        .clone()
        .oneshot(make_form_request(uri, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {uri}");
    assert_eq!(response.headers()["location"], "/");
}

async fn get_page(app: &Router) -> String {
    let response = app.clone().oneshot(make_get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_string(response.into_body()).await
}

async fn get_users(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(make_get_request("/api/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

fn names(listing: &Value) -> Vec<String> {
    listing["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap().to_string())
        .collect()
}

/// Open the create form and register one user
async fn register(app: &Router, name: &str, email: &str) {
    post_form(app, "/users/new", "").await;
    let body = serde_urlencoded::to_string([("name", name), ("email", email)]).unwrap();
    post_form(app, "/form/submit", &body).await;
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    let app = create_test_app(&state);

    let response = app.oneshot(make_get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["users"], 0);
    assert!(body["version"].as_str().is_some());
}

// =============================================================================
// Page Tests
// =============================================================================

#[tokio::test]
async fn test_empty_page() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    let page = get_page(&app).await;

    assert!(page.contains("User Registry"));
    assert!(page.contains("No users found"));
}

#[tokio::test]
async fn test_registration_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    // Create with mixed-case email
    register(&app, "Ana Silva", "ANA@EX.com").await;

    let listing = get_users(&app).await;
    assert_eq!(listing["users"].as_array().unwrap().len(), 1);
    assert_eq!(listing["users"][0]["name"], "Ana Silva");
    assert_eq!(listing["users"][0]["email"], "ana@ex.com");
    let id = listing["users"][0]["id"].as_u64().unwrap();

    // Same email again, the create form is still open
    post_form(&app, "/form/submit", "name=Ana2&email=ana%40ex.com").await;

    let listing = get_users(&app).await;
    assert_eq!(listing["users"].as_array().unwrap().len(), 1);
    assert!(get_page(&app).await.contains(MSG_EMAIL_REGISTERED));

    // Edit the name
    post_form(&app, &format!("/users/{id}/edit"), "").await;
    post_form(&app, "/form/submit", "name=Ana+S.").await;

    let listing = get_users(&app).await;
    assert_eq!(listing["users"][0]["name"], "Ana S.");
    assert_eq!(listing["users"][0]["email"], "ana@ex.com");

    // Delete through the confirmation dialog
    post_form(&app, &format!("/users/{id}/delete"), "").await;
    assert!(get_page(&app).await.contains("Confirm deletion?"));
    post_form(&app, "/delete/confirm", "").await;

    let listing = get_users(&app).await;
    assert!(listing["users"].as_array().unwrap().is_empty());
    assert!(state.service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_form_does_not_reach_store() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    post_form(&app, "/users/new", "").await;
    post_form(&app, "/form/submit", "name=Al&email=not-an-email").await;

    let page = get_page(&app).await;
    assert!(page.contains("Minimum 3 characters"));
    assert!(page.contains("Enter a valid e-mail"));
    assert!(state.service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_ignores_submitted_email() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Ana Silva", "ana@ex.com").await;
    let id = get_users(&app).await["users"][0]["id"].as_u64().unwrap();

    post_form(&app, &format!("/users/{id}/edit"), "").await;
    post_form(&app, "/form/submit", "name=Ana+Silva&email=other%40ex.com").await;

    let stored = state.service.list_users().await.unwrap();
    assert_eq!(stored[0].email, "ana@ex.com");
}

#[tokio::test]
async fn test_cancel_delete_keeps_user() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Ana Silva", "ana@ex.com").await;
    let id = get_users(&app).await["users"][0]["id"].as_u64().unwrap();

    post_form(&app, &format!("/users/{id}/delete"), "").await;
    post_form(&app, "/delete/cancel", "").await;
    post_form(&app, "/delete/confirm", "").await;

    assert_eq!(get_users(&app).await["users"].as_array().unwrap().len(), 1);
    assert!(!get_page(&app).await.contains("Confirm deletion?"));
}

#[tokio::test]
async fn test_cancel_form_closes_form() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    post_form(&app, "/users/new", "").await;
    post_form(&app, "/form/submit", "name=Al&email=not-an-email").await;
    assert!(get_page(&app).await.contains("user-form"));

    post_form(&app, "/form/cancel", "").await;

    let page = get_page(&app).await;
    assert!(!page.contains("user-form"));
    assert!(!page.contains("Minimum 3 characters"));
    assert!(state.service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_and_search_rejected_while_operation_pending() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    post_form(&app, "/users/new", "").await;

    // Leave a load pending
    let pending = state.view.lock().await.begin_load().unwrap();

    post_form(&app, "/form/cancel", "").await;
    post_form(&app, "/search", "q=zzz").await;

    let page = get_page(&app).await;
    assert!(page.contains(MSG_BUSY));
    assert!(page.contains("user-form"));
    assert_eq!(get_users(&app).await["search"], "");

    state.run(pending).await;
    post_form(&app, "/form/cancel", "").await;
    assert!(!get_page(&app).await.contains("user-form"));
}

#[tokio::test]
async fn test_search_and_sort() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Carla", "carla@ex.com").await;
    register(&app, "Ana Silva", "ana@ex.com").await;
    register(&app, "Bruno", "bruno@mail.org").await;

    assert_eq!(names(&get_users(&app).await), vec!["Ana Silva", "Bruno", "Carla"]);

    // Empty form flips the direction
    post_form(&app, "/sort", "").await;
    let listing = get_users(&app).await;
    assert_eq!(names(&listing), vec!["Carla", "Bruno", "Ana Silva"]);
    assert_eq!(listing["sort"]["direction"], "desc");

    post_form(&app, "/search", "q=EX.COM").await;
    assert_eq!(names(&get_users(&app).await), vec!["Carla", "Ana Silva"]);

    post_form(&app, "/sort", "key=email&direction=asc").await;
    assert_eq!(names(&get_users(&app).await), vec!["Ana Silva", "Carla"]);

    post_form(&app, "/search", "q=").await;
    assert_eq!(get_users(&app).await["users"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_dismiss_notification() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Ana Silva", "ana@ex.com").await;
    assert!(get_page(&app).await.contains(MSG_REGISTERED));

    let id = {
        let view = state.view.lock().await;
        let notification = view.notifications().iter().next().unwrap();
        notification.id
    };
    post_form(&app, &format!("/notifications/{id}/dismiss"), "").await;

    assert!(!get_page(&app).await.contains(MSG_REGISTERED));
}

#[tokio::test]
async fn test_mutations_rejected_while_operation_pending() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    let app = create_test_app(&state);

    // Leave a load pending
    let pending = state.view.lock().await.begin_load().unwrap();

    post_form(&app, "/users/new", "").await;

    let page = get_page(&app).await;
    assert!(page.contains(MSG_BUSY));
    assert!(page.contains("http-equiv=\"refresh\""));
    assert!(!page.contains("user-form"));
    assert_eq!(get_users(&app).await["loading"], true);

    state.run(pending).await;
    assert_eq!(get_users(&app).await["loading"], false);
}

#[tokio::test]
async fn test_records_reload_into_new_view() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Ana Silva", "ana@ex.com").await;
    register(&app, "Bruno", "bruno@ex.com").await;

    // Fresh view over the same database, as after a restart
    let restarted = AppState::new(state.db.clone(), state.config.clone());
    restarted.load_users().await;
    let app = create_test_app(&restarted);

    assert_eq!(names(&get_users(&app).await), vec!["Ana Silva", "Bruno"]);
}

#[tokio::test]
async fn test_edit_unknown_user_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    post_form(&app, "/users/42/edit", "").await;

    assert!(!get_page(&app).await.contains("user-form"));
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    let app = create_test_app(&state);

    let response = app
        .oneshot(make_form_request("/users/abc/edit", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// JSON Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_get_user_by_id() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir);
    state.load_users().await;
    let app = create_test_app(&state);

    register(&app, "Ana Silva", "ANA@EX.com").await;
    let id = get_users(&app).await["users"][0]["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(make_get_request(&format!("/api/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["email"], "ana@ex.com");

    let response = app
        .oneshot(make_get_request(&format!("/api/users/{}", id + 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
