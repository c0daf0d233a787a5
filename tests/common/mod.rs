// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

use axum::body::Body;
use axum::http::Response;
use mitc_site::db::FirestoreDb;
use mitc_site::middleware::auth::{create_session_token, SESSION_COOKIE};
use mitc_site::routes::create_router;
use mitc_site::config::Config;
use mitc_site::services::IdentityClient;
use mitc_site::AppState;
use std::sync::Arc;

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
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create an app backed by the emulator under `project_id`.
///
/// A fresh project ID gives the test an empty database of its own.
#[allow(dead_code)]
pub async fn create_emulator_app(project_id: &str) -> (axum::Router, Arc<AppState>) {
    let db = FirestoreDb::new(project_id)
        .await
        .expect("Failed to connect to Firestore emulator");
    let state = Arc::new(AppState::new(
        Config::test_default(),
        db,
        IdentityClient::new_mock(),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::for_tests());
    (create_router(state.clone()), state)
}

/// `Cookie` header value carrying a valid session for `uid`.
#[allow(dead_code)]
pub fn session_cookie_header(state: &AppState, uid: &str) -> String {
    let token = create_session_token(uid, "test@example.com", "Test User", &state.config.jwt_signing_key)
        .expect("Failed to create session token");
    format!("{}={}", SESSION_COOKIE, token)
}

/// All `Set-Cookie` header values of a response.
#[allow(dead_code)]
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Read a response body as UTF-8 text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
