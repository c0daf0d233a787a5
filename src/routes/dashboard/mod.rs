// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Admin console. Every route here sits behind the admin role gate.

pub mod leads;
pub mod ratings;
pub mod settings;
pub mod users;
pub mod visits;

use crate::error::Result;
use crate::middleware::Session;
use crate::notice::Notice;
use crate::services::DashboardStats;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(overview))
        .merge(leads::routes())
        .merge(users::routes())
        .merge(ratings::routes())
        .merge(visits::routes())
        .merge(settings::routes())
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct OverviewPage {
    layout: Layout,
    stats: DashboardStats,
}

async fn overview(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/dashboard", jar).await;

    let stats = match DashboardStats::load(&state.db).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching dashboard stats");
            layout.push(Notice::error("Failed to load dashboard stats"));
            DashboardStats::default()
        }
    };

    Ok((jar, render(&OverviewPage { layout, stats })?))
}
