// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_server::config::Config;
use activity_server::db::{ActivityStore, FirestoreDb, MemoryDb};
use activity_server::routes::create_router;
use activity_server::AppState;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project", "(default)")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build the router over an arbitrary store.
#[allow(dead_code)]
pub fn create_test_app_with_store(db: Arc<dyn ActivityStore>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db,
    });
    (create_router(state.clone()), state)
}

/// Create a test app over an in-memory store.
/// Returns the router and the store, so tests can seed and inspect it.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<MemoryDb>) {
    let memory = Arc::new(MemoryDb::new());
    let (app, _) = create_test_app_with_store(memory.clone());
    (app, memory)
}

/// Create a test app whose store is offline (every operation fails).
#[allow(dead_code)]
pub fn create_offline_test_app() -> Router {
    create_test_app_with_store(Arc::new(FirestoreDb::new_mock())).0
}

/// Send one request and return the status and body text.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// POST a URL-encoded form body.
#[allow(dead_code)]
pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// GET a path.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
