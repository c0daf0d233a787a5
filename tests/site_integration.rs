// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! End-to-end router tests against the Firestore emulator.
//!
//! Each test runs under its own project ID so counts are not disturbed by
//! other tests. Skipped when `FIRESTORE_EMULATOR_HOST` is not set.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use mitc_site::models::{Role, SiteSettings, User};
use mitc_site::services::SettingsService;
use mitc_site::time_utils;
use std::time::Duration;
use tower::ServiceExt;

mod common;
use common::{body_text, create_emulator_app, session_cookie_header};

fn unique_project(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTACT
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_contact_submission_stores_one_unread_lead() {
    require_emulator!();

    let (app, state) = create_emulator_app(&unique_project("contact")).await;
    let email = format!("ana-{}@example.com", unique_project("lead"));
    let body = format!(
        "name=Ana&email={}&phone=9876543210&message=Need+a+laptop",
        urlencoding::encode(&email)
    );

    let response = app.oneshot(post_form("/contact", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/contact"
    );

    let leads = state.db.list_leads().await.unwrap();
    let matching: Vec<_> = leads.iter().filter(|l| l.email == email).collect();
    assert_eq!(matching.len(), 1);
    assert!(!matching[0].read);
    assert_eq!(matching[0].message, "Need a laptop");
    assert!(matching[0].user_id.is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// SETTINGS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_absent_settings_document_yields_defaults() {
    require_emulator!();

    let (app, state) = create_emulator_app(&unique_project("settings")).await;
    assert!(state.db.get_settings().await.unwrap().is_none());

    let loaded = SettingsService::new(state.db.clone()).load().await;
    assert!(loaded.error.is_none());
    assert_eq!(loaded.settings, SiteSettings::default());

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("MITC - Mateen IT Corp"));
    assert!(!body.contains("Failed to load settings"));
}

// ═══════════════════════════════════════════════════════════════════════════
// ADMIN
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_admin_session_reaches_dashboard() {
    require_emulator!();

    let (app, state) = create_emulator_app(&unique_project("admin")).await;
    let uid = "admin-1";
    let mut admin = User::new(uid, "Staff", "staff@example.com", "", time_utils::now());
    admin.role = Role::Admin;
    state.db.upsert_user(&admin).await.unwrap();

    for uri in ["/dashboard", "/dashboard/leads", "/dashboard/settings"] {
        let mut request = get(uri);
        request.headers_mut().insert(
            header::COOKIE,
            session_cookie_header(&state, uid).parse().unwrap(),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);

        let body = body_text(response).await;
        assert!(!body.contains("Failed to load"), "GET {}", uri);
    }
}

#[tokio::test]
async fn test_plain_user_session_is_turned_away() {
    require_emulator!();

    let (app, state) = create_emulator_app(&unique_project("user")).await;
    let uid = "user-1";
    let user = User::new(uid, "Ana", "ana@example.com", "", time_utils::now());
    state.db.upsert_user(&user).await.unwrap();

    let mut request = get("/dashboard");
    request.headers_mut().insert(
        header::COOKIE,
        session_cookie_header(&state, uid).parse().unwrap(),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// ═══════════════════════════════════════════════════════════════════════════
// VISIT TRACKING
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_only_successful_page_gets_are_tracked() {
    require_emulator!();

    let (app, state) = create_emulator_app(&unique_project("visits")).await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Validation failure (400), unknown path (404) and an untracked page
    let response = app
        .clone()
        .oneshot(post_form("/contact", "name=Ana&email=a@example.com&message=hi"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = app.clone().oneshot(get("/no-such-page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.clone().oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Writes happen in the background after the response
    let mut visits = Vec::new();
    for _ in 0..20 {
        visits = state.db.list_visits().await.unwrap();
        if !visits.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(300)).await;
    let visits_after = state.db.list_visits().await.unwrap();

    assert_eq!(visits.len(), 1);
    assert_eq!(visits_after.len(), 1);
    assert_eq!(visits_after[0].path, "/");
}
