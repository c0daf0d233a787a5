// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Page-view analytics.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::visit::{filter_by_range, VisitStats};
use crate::models::Visit;
use crate::notice::Notice;
use crate::time_utils::{end_of_day, start_of_day};
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

const MAX_ROWS: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/visits", get(list_visits))
}

/// Date filter (`YYYY-MM-DD`). Applied only when both bounds are present.
#[derive(Debug, Default, Deserialize)]
pub struct VisitsQuery {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Template)]
#[template(path = "dashboard/visits.html")]
struct VisitsPage {
    layout: Layout,
    stats: VisitStats,
    visits: Vec<Visit>,
    from: String,
    to: String,
    /// Visits matched before the row cap
    matched: usize,
}

async fn list_visits(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<VisitsQuery>,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/dashboard/visits", jar).await;

    let mut visits = match state.db.list_visits().await {
        Ok(visits) => visits,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching visits");
            layout.push(Notice::error("Failed to load visits"));
            Vec::new()
        }
    };

    let from = query.from.trim().to_string();
    let to = query.to.trim().to_string();
    if !from.is_empty() && !to.is_empty() {
        match (start_of_day(&from), end_of_day(&to)) {
            (Some(start), Some(end)) => visits = filter_by_range(&visits, start, end),
            _ => layout.push(Notice::error("Invalid date range")),
        }
    }

    let stats = VisitStats::from_visits(&visits);
    let matched = visits.len();
    visits.truncate(MAX_ROWS);

    let page = VisitsPage {
        layout,
        stats,
        visits,
        from,
        to,
        matched,
    };
    Ok((jar, render(&page)?))
}
