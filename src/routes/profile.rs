// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Signed-in user's profile and review management.

use crate::error::{AppError, Result};
use crate::middleware::{RequireUser, Session};
use crate::models::user::ProfilePatch;
use crate::models::{Review, ReviewPatch};
use crate::notice::{self, Notice};
use crate::time_utils;
use crate::views::{render, validation_messages, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile_page).post(update_profile))
        .route("/profile/review", post(update_review))
        .route("/profile/review/delete", post(delete_review))
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfilePage {
    layout: Layout,
    name: String,
    email: String,
    phone: String,
    photo_url: String,
    review: Option<Review>,
}

async fn profile_page(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/profile", jar).await;

    let review = match state.db.find_review_for_user(&user.uid).await {
        Ok(review) => review,
        Err(e) => {
            tracing::error!(uid = %user.uid, error = %e, "Error fetching review");
            layout.push(Notice::error("Failed to load your review"));
            None
        }
    };

    let page = ProfilePage {
        layout,
        name: user.name,
        email: user.email,
        phone: user.phone,
        photo_url: user.photo_url,
        review,
    };
    Ok((jar, render(&page)?))
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Save name and phone. Email is managed by the auth service and not editable.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
    Form(form): Form<ProfileForm>,
) -> impl IntoResponse {
    let patch = ProfilePatch {
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
    };

    let notice = match state.db.update_profile(&user.uid, &patch).await {
        Ok(()) => {
            tracing::info!(uid = %user.uid, "Profile updated");
            Notice::success("Profile updated successfully!")
        }
        Err(e) => {
            tracing::error!(uid = %user.uid, error = %e, "Error updating profile");
            Notice::error("Failed to update profile")
        }
    };

    (notice::set(jar, notice), Redirect::to("/profile"))
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
}

/// Edit the user's existing review. New reviews are not accepted here.
async fn update_review(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
    Form(form): Form<ReviewForm>,
) -> impl IntoResponse {
    let notice = match save_review(&state, &user.uid, form).await {
        Ok(notice) => notice,
        Err(e) => {
            tracing::error!(uid = %user.uid, error = %e, "Error saving review");
            Notice::error("Failed to save review")
        }
    };
    (notice::set(jar, notice), Redirect::to("/profile"))
}

async fn save_review(state: &AppState, uid: &str, form: ReviewForm) -> Result<Notice> {
    let Some(existing) = state.db.find_review_for_user(uid).await? else {
        return Ok(Notice::error(
            "Unable to submit new review. Please contact admin.",
        ));
    };

    let patch = ReviewPatch {
        rating: form.rating.trim().parse().unwrap_or(0),
        comment: form.comment.trim().to_string(),
        updated_at: Some(time_utils::now()),
    };
    if let Err(errors) = patch.validate() {
        return Ok(Notice::error(validation_messages(&errors).join(", ")));
    }

    state.db.update_review(existing.doc_id(), &patch).await?;
    tracing::info!(uid = %uid, review_id = %existing.doc_id(), "Review updated");
    Ok(Notice::success("Review updated successfully!"))
}

#[derive(Debug, Deserialize)]
pub struct DeleteReviewForm {
    pub id: String,
}

/// Delete one of the user's own reviews.
async fn delete_review(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
    Form(form): Form<DeleteReviewForm>,
) -> Result<impl IntoResponse> {
    let review = match state.db.get_review(&form.id).await {
        Ok(Some(review)) => review,
        Ok(None) => return Err(AppError::NotFound(format!("Review {}", form.id))),
        Err(e) => {
            tracing::error!(uid = %user.uid, error = %e, "Error fetching review");
            let jar = notice::set(jar, Notice::error("Failed to delete review"));
            return Ok((jar, Redirect::to("/profile")));
        }
    };

    if !review.is_owned_by(&user.uid) {
        tracing::warn!(uid = %user.uid, review_id = %form.id, "Review delete by non-owner");
        return Err(AppError::Forbidden);
    }

    let notice = match state.db.delete_review(&form.id).await {
        Ok(()) => {
            tracing::info!(uid = %user.uid, review_id = %form.id, "Review deleted");
            Notice::success("Review deleted successfully!")
        }
        Err(e) => {
            tracing::error!(uid = %user.uid, error = %e, "Error deleting review");
            Notice::error("Failed to delete review")
        }
    };
    Ok((notice::set(jar, notice), Redirect::to("/profile")))
}
