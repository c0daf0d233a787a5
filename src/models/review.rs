// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Customer review model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review stored in Firestore (`reviews/{auto-id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: String,
    /// 1-5 stars
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn doc_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.user_id.as_deref() == Some(uid)
    }

    /// Five entries, `true` for each filled star.
    pub fn stars(&self) -> Vec<bool> {
        stars(f64::from(self.rating))
    }

    pub fn star_text(&self) -> String {
        star_text(f64::from(self.rating))
    }

    pub fn created_display(&self) -> String {
        crate::time_utils::display_date(&self.created_at)
    }
}

/// Owner edit of an existing review.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, with = "firestore::serialize_as_optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ReviewPatch {
    pub const FIELDS: [&'static str; 3] = ["rating", "comment", "updatedAt"];
}

/// Mean rating rounded to one decimal place; 0 when there are no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let avg = f64::from(sum) / reviews.len() as f64;
    (avg * 10.0).round() / 10.0
}

/// Star strip for a (possibly fractional) rating, rounded to whole stars.
pub fn stars(rating: f64) -> Vec<bool> {
    let filled = rating.round() as i64;
    (1..=5).map(|i| i <= filled).collect()
}

/// `★★★★☆` rendering of [`stars`].
pub fn star_text(rating: f64) -> String {
    stars(rating)
        .into_iter()
        .map(|filled| if filled { '★' } else { '☆' })
        .collect()
}
