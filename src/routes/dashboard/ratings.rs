// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Review moderation.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::review::average_rating;
use crate::models::Review;
use crate::notice::{self, Notice};
use crate::time_utils;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/ratings", get(list_ratings).post(add_review))
        .route("/dashboard/ratings/{id}/delete", post(delete_review))
}

#[derive(Template)]
#[template(path = "dashboard/ratings.html")]
struct RatingsPage {
    layout: Layout,
    reviews: Vec<Review>,
    average: String,
}

async fn list_ratings(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/dashboard/ratings", jar).await;

    let reviews = match state.db.list_reviews().await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching reviews");
            layout.push(Notice::error("Failed to load reviews"));
            Vec::new()
        }
    };

    let page = RatingsPage {
        layout,
        average: format!("{:.1}", average_rating(&reviews)),
        reviews,
    };
    Ok((jar, render(&page)?))
}

/// Review entered by staff on a customer's behalf.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
    /// Owning account, so the customer can edit it from their profile
    #[serde(default)]
    pub user_id: String,
}

impl NewReviewForm {
    /// Validated review ready to insert, or the message to show.
    pub fn into_review(self, created_at: DateTime<Utc>) -> std::result::Result<Review, &'static str> {
        let user_name = self.user_name.trim().to_string();
        if user_name.is_empty() {
            return Err("Please enter the customer's name");
        }
        let rating: u8 = self.rating.trim().parse().unwrap_or(0);
        if !(1..=5).contains(&rating) {
            return Err("Rating must be between 1 and 5");
        }
        let user_id = Some(self.user_id.trim().to_string()).filter(|id| !id.is_empty());

        Ok(Review {
            id: None,
            user_name,
            rating,
            comment: self.comment.trim().to_string(),
            user_id,
            created_at,
            updated_at: None,
        })
    }
}

async fn add_review(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<NewReviewForm>,
) -> impl IntoResponse {
    let notice = match form.into_review(time_utils::now()) {
        Err(problem) => Notice::error(problem),
        Ok(review) => match state.db.create_review(&review).await {
            Ok(created) => {
                tracing::info!(review_id = %created.doc_id(), "Review added");
                Notice::success("Review added successfully")
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding review");
                Notice::error("Failed to add review")
            }
        },
    };
    (notice::set(jar, notice), Redirect::to("/dashboard/ratings"))
}

async fn delete_review(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(review_id): Path<String>,
) -> impl IntoResponse {
    let notice = match state.db.delete_review(&review_id).await {
        Ok(()) => {
            tracing::info!(review_id = %review_id, "Review deleted by admin");
            Notice::success("Review deleted successfully")
        }
        Err(e) => {
            tracing::error!(review_id = %review_id, error = %e, "Error deleting review");
            Notice::error("Failed to delete review")
        }
    };
    (notice::set(jar, notice), Redirect::to("/dashboard/ratings"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, rating: &str, user_id: &str) -> NewReviewForm {
        NewReviewForm {
            user_name: name.into(),
            rating: rating.into(),
            comment: "  Quick repair  ".into(),
            user_id: user_id.into(),
        }
    }

    #[test]
    fn test_new_review_validation() {
        assert_eq!(
            form("", "5", "").into_review(time_utils::now()).unwrap_err(),
            "Please enter the customer's name"
        );
        assert_eq!(
            form("Ana", "0", "").into_review(time_utils::now()).unwrap_err(),
            "Rating must be between 1 and 5"
        );
        assert_eq!(
            form("Ana", "five", "").into_review(time_utils::now()).unwrap_err(),
            "Rating must be between 1 and 5"
        );
    }

    #[test]
    fn test_new_review_fields() {
        let review = form("Ana", "4", " uid-1 ")
            .into_review(time_utils::now())
            .unwrap();
        assert_eq!(review.rating, 4);
        assert_eq!(review.comment, "Quick repair");
        assert_eq!(review.user_id.as_deref(), Some("uid-1"));

        let anonymous = form("Ana", "4", "").into_review(time_utils::now()).unwrap();
        assert!(anonymous.user_id.is_none());
    }
}
