// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles and roles)
//! - Leads (contact-form submissions)
//! - Reviews (customer ratings)
//! - Site visits (page-view analytics)
//! - Site settings (the `siteSettings/global` singleton)

use crate::db::collections;
use crate::error::AppError;
use crate::models::lead::LeadReadPatch;
use crate::models::user::ProfilePatch;
use crate::models::{Lead, Review, ReviewPatch, SettingsUpdate, SiteSettings, User, Visit};
use chrono::{DateTime, Utc};

/// Upper bound on visit documents loaded for the analytics page.
pub const MAX_VISITS_SCAN: u32 = 10_000;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token, so skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a client with no backing connection.
    ///
    /// Used when Firebase configuration is missing and in offline tests.
    /// All database operations return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Helper to get the client or return an error if not initialized.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::Database(
                "Firestore is not initialized. Make sure all FIREBASE_* environment variables are set."
                    .to_string(),
            )
        })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by auth UID.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        let user: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Older documents may lack the uid field; the document ID is authoritative
        Ok(user.map(|mut u| {
            if u.uid.is_empty() {
                u.uid = uid.to_string();
            }
            u
        }))
    }

    /// Create or overwrite a user profile.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Create a user profile only if none exists yet.
    ///
    /// Returns `true` when a new document was written. Existing profiles
    /// (and their roles) are left untouched.
    pub async fn create_user_if_absent(&self, user: &User) -> Result<bool, AppError> {
        if self.get_user(&user.uid).await?.is_some() {
            return Ok(false);
        }
        self.upsert_user(user).await?;
        Ok(true)
    }

    /// Update the owner-editable profile fields (name, phone) only.
    ///
    /// The profile must already exist; a missing document is reported as
    /// `NotFound` rather than created with only the patched fields.
    pub async fn update_profile(&self, uid: &str, patch: &ProfilePatch) -> Result<(), AppError> {
        let result: Result<(), _> = self
            .get_client()?
            .fluent()
            .update()
            .fields(ProfilePatch::FIELDS)
            .in_col(collections::USERS)
            .precondition(firestore::FirestoreWritePrecondition::Exists(true))
            .document_id(uid)
            .object(patch)
            .execute()
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(firestore::errors::FirestoreError::DataNotFoundError(_)) => {
                Err(AppError::NotFound(format!("user {}", uid)))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// All users, newest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_users(&self) -> Result<usize, AppError> {
        let docs = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.len())
    }

    // ─── Lead Operations ─────────────────────────────────────────

    /// Insert a lead under a generated document ID and return it with the ID set.
    pub async fn create_lead(&self, lead: &Lead) -> Result<Lead, AppError> {
        let created: Lead = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::LEADS)
            .generate_document_id()
            .object(lead)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(created)
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Option<Lead>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::LEADS)
            .obj()
            .one(lead_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All leads, newest first.
    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::LEADS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_unread_leads(&self) -> Result<usize, AppError> {
        let docs = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::LEADS)
            .filter(|q| q.for_all([q.field("read").eq(false)]))
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.len())
    }

    /// Set `read: true` on a lead, leaving every other field as stored.
    pub async fn mark_lead_read(&self, lead_id: &str) -> Result<(), AppError> {
        if self.get_lead(lead_id).await?.is_none() {
            return Err(AppError::NotFound(format!("lead {}", lead_id)));
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(LeadReadPatch::FIELDS)
            .in_col(collections::LEADS)
            .document_id(lead_id)
            .object(&LeadReadPatch { read: true })
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(lead_id, "Lead marked as read");
        Ok(())
    }

    // ─── Review Operations ───────────────────────────────────────

    /// All reviews, newest first.
    pub async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::REVIEWS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get_review(&self, review_id: &str) -> Result<Option<Review>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::REVIEWS)
            .obj()
            .one(review_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The review written by a user, if any.
    pub async fn find_review_for_user(&self, uid: &str) -> Result<Option<Review>, AppError> {
        let uid = uid.to_string();
        let reviews: Vec<Review> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::REVIEWS)
            .filter(move |q| q.for_all([q.field("userId").eq(uid.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(reviews.into_iter().next())
    }

    /// Insert a review under a generated document ID.
    pub async fn create_review(&self, review: &Review) -> Result<Review, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::REVIEWS)
            .generate_document_id()
            .object(review)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update rating, comment and `updatedAt` only.
    pub async fn update_review(&self, review_id: &str, patch: &ReviewPatch) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(ReviewPatch::FIELDS)
            .in_col(collections::REVIEWS)
            .document_id(review_id)
            .object(patch)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::REVIEWS)
            .document_id(review_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Number of reviews created at or after `since`.
    pub async fn count_reviews_since(&self, since: DateTime<Utc>) -> Result<usize, AppError> {
        let docs = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::REVIEWS)
            .filter(move |q| {
                q.for_all([q
                    .field("createdAt")
                    .greater_than_or_equal(firestore::FirestoreTimestamp(since))])
            })
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.len())
    }

    // ─── Visit Operations ────────────────────────────────────────

    /// Append a page-view record.
    pub async fn record_visit(&self, visit: &Visit) -> Result<(), AppError> {
        let _: Visit = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::SITE_VISITS)
            .generate_document_id()
            .object(visit)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Most recent visits, newest first, capped at [`MAX_VISITS_SCAN`].
    pub async fn list_visits(&self) -> Result<Vec<Visit>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SITE_VISITS)
            .order_by([("timestamp", firestore::FirestoreQueryDirection::Descending)])
            .limit(MAX_VISITS_SCAN)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of visits at or after `since`.
    pub async fn count_visits_since(&self, since: DateTime<Utc>) -> Result<usize, AppError> {
        let docs = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SITE_VISITS)
            .filter(move |q| {
                q.for_all([q
                    .field("timestamp")
                    .greater_than_or_equal(firestore::FirestoreTimestamp(since))])
            })
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.len())
    }

    // ─── Settings Operations ─────────────────────────────────────

    /// Read the settings singleton. `None` when it has never been written.
    pub async fn get_settings(&self) -> Result<Option<SiteSettings>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SITE_SETTINGS)
            .obj()
            .one(collections::SETTINGS_DOC_ID)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write only the fields present in `update`.
    ///
    /// Creates the singleton if it does not exist yet.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<(), AppError> {
        let fields = update.field_paths();
        if fields.is_empty() {
            return Ok(());
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::SITE_SETTINGS)
            .document_id(collections::SETTINGS_DOC_ID)
            .object(update)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
