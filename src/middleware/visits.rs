// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Page-view tracking middleware.

use crate::models::visit::{should_track, Visit};
use crate::time_utils;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Only successful `GET`s of tracked paths count as page views.
pub fn should_record(method: &Method, status: StatusCode, path: &str) -> bool {
    method == Method::GET && status.is_success() && should_track(path)
}

/// Record successful `GET` page views in the background.
///
/// The write is spawned after the response is produced and never affects it.
pub async fn track_visits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let response = next.run(request).await;

    if should_record(&method, response.status(), &path) {
        let visit = Visit::new(&path, time_utils::now());
        tokio::spawn(async move {
            if let Err(e) = state.db.record_visit(&visit).await {
                tracing::debug!(path = %visit.path, error = %e, "Error tracking visit");
            }
        });
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_successful_gets_are_recorded() {
        assert!(should_record(&Method::GET, StatusCode::OK, "/"));
        assert!(should_record(&Method::GET, StatusCode::OK, "/services"));

        assert!(!should_record(&Method::POST, StatusCode::OK, "/contact"));
        assert!(!should_record(&Method::POST, StatusCode::SEE_OTHER, "/contact"));
        assert!(!should_record(&Method::GET, StatusCode::NOT_FOUND, "/missing"));
        assert!(!should_record(&Method::GET, StatusCode::SEE_OTHER, "/profile"));
        assert!(!should_record(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR, "/ratings"));
        assert!(!should_record(&Method::GET, StatusCode::OK, "/dashboard/leads"));
    }
}
