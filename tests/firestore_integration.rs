// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (`FIRESTORE_EMULATOR_HOST`). They are skipped otherwise.

use mitc_site::models::review::ReviewPatch;
use mitc_site::models::user::ProfilePatch;
use mitc_site::models::{ContactForm, Review, Role, SettingsUpdate, User, Visit};
use mitc_site::services::SettingsService;
use mitc_site::error::AppError;
use mitc_site::time_utils;

mod common;
use common::test_db;

/// Unique suffix for test isolation.
fn unique_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string()
}

fn test_user(uid: &str) -> User {
    User::new(uid, "Test User", "test@example.com", "", time_utils::now())
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_user_if_absent_keeps_role() {
    require_emulator!();

    let db = test_db().await;
    let uid = format!("user-{}", unique_id());

    assert!(db.get_user(&uid).await.unwrap().is_none());

    let mut admin = test_user(&uid);
    admin.role = Role::Admin;
    db.upsert_user(&admin).await.unwrap();

    // A later Google sign-in must not reset the role
    let created = db.create_user_if_absent(&test_user(&uid)).await.unwrap();
    assert!(!created);

    let stored = db.get_user(&uid).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Admin);
}

#[tokio::test]
async fn test_update_profile_touches_name_and_phone_only() {
    require_emulator!();

    let db = test_db().await;
    let uid = format!("user-{}", unique_id());
    let user = test_user(&uid);
    db.upsert_user(&user).await.unwrap();

    let patch = ProfilePatch {
        name: "Renamed".to_string(),
        phone: "+91 98765 43210".to_string(),
    };
    db.update_profile(&uid, &patch).await.unwrap();

    let stored = db.get_user(&uid).await.unwrap().unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.phone, "+91 98765 43210");
    assert_eq!(stored.email, user.email);
    assert_eq!(stored.role, Role::User);
    assert_eq!(stored.created_at, user.created_at);
}

#[tokio::test]
async fn test_update_profile_requires_existing_profile() {
    require_emulator!();

    let db = test_db().await;
    let uid = format!("user-{}", unique_id());
    let patch = ProfilePatch {
        name: "Ghost".to_string(),
        phone: "123".to_string(),
    };

    let result = db.update_profile(&uid, &patch).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(db.get_user(&uid).await.unwrap().is_none());
}

#[tokio::test]
async fn test_recent_reviews_are_counted_by_timestamp() {
    require_emulator!();

    let db = test_db().await;
    let before = time_utils::ago(chrono::Duration::seconds(1));
    let review = Review {
        id: None,
        user_name: "Counted".to_string(),
        rating: 4,
        comment: String::new(),
        user_id: None,
        created_at: time_utils::now(),
        updated_at: None,
    };
    db.create_review(&review).await.unwrap();

    assert!(db.count_reviews_since(before).await.unwrap() >= 1);
    let future = time_utils::ago(chrono::Duration::days(-1));
    assert_eq!(db.count_reviews_since(future).await.unwrap(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// LEAD TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_lead_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let form = ContactForm {
        name: "Ana".to_string(),
        email: format!("ana-{}@example.com", unique_id()),
        phone: "9876543210".to_string(),
        message: "Need a laptop".to_string(),
    };
    let lead = form.into_lead(None, time_utils::now());

    let created = db.create_lead(&lead).await.unwrap();
    let lead_id = created.doc_id().to_string();
    assert!(!lead_id.is_empty());
    assert!(!created.read);

    db.mark_lead_read(&lead_id).await.unwrap();

    let stored = db.get_lead(&lead_id).await.unwrap().unwrap();
    assert!(stored.read);
    assert_eq!(stored.message, "Need a laptop");
    assert_eq!(stored.created_at, lead.created_at);
}

#[tokio::test]
async fn test_mark_missing_lead_read() {
    require_emulator!();

    let db = test_db().await;
    let result = db.mark_lead_read(&format!("missing-{}", unique_id())).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// REVIEW TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_review_owner_edit_and_delete() {
    require_emulator!();

    let db = test_db().await;
    let uid = format!("user-{}", unique_id());
    let review = Review {
        id: None,
        user_name: "Ana".to_string(),
        rating: 3,
        comment: "Okay".to_string(),
        user_id: Some(uid.clone()),
        created_at: time_utils::now(),
        updated_at: None,
    };

    let created = db.create_review(&review).await.unwrap();
    let review_id = created.doc_id().to_string();

    let found = db.find_review_for_user(&uid).await.unwrap().unwrap();
    assert_eq!(found.doc_id(), review_id);

    let patch = ReviewPatch {
        rating: 5,
        comment: "Great service".to_string(),
        updated_at: Some(time_utils::now()),
    };
    db.update_review(&review_id, &patch).await.unwrap();

    let stored = db.get_review(&review_id).await.unwrap().unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.comment, "Great service");
    assert_eq!(stored.user_name, "Ana");
    assert!(stored.updated_at.is_some());

    db.delete_review(&review_id).await.unwrap();
    assert!(db.get_review(&review_id).await.unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// VISIT & SETTINGS TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_visits_are_counted() {
    require_emulator!();

    let db = test_db().await;
    let since = time_utils::now();
    let path = format!("/test-{}", unique_id());

    db.record_visit(&Visit::new(&path, time_utils::now())).await.unwrap();
    db.record_visit(&Visit::new(&path, time_utils::now())).await.unwrap();

    assert!(db.count_visits_since(since).await.unwrap() >= 2);
    let visits = db.list_visits().await.unwrap();
    assert_eq!(visits.iter().filter(|v| v.path == path).count(), 2);
}

#[tokio::test]
async fn test_settings_partial_update() {
    require_emulator!();

    let db = test_db().await;
    let title = format!("Title {}", unique_id());
    let update = SettingsUpdate {
        site_title: Some(title.clone()),
        ..Default::default()
    };

    let service = SettingsService::new(db.clone());
    let saved = service.update(&update).await.unwrap();
    assert_eq!(saved.site_title, title);

    let stored = db.get_settings().await.unwrap().unwrap();
    assert_eq!(stored.site_title, title);
    // Fields never written read back as defaults
    assert!(!stored.business_name.is_empty());

    // A fresh service has no snapshot and reads the document
    let loaded = SettingsService::new(db.clone()).load().await;
    assert!(loaded.error.is_none());
    assert_eq!(loaded.settings.site_title, title);
}
