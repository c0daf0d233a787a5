// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Registered users list.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::User;
use crate::notice::Notice;
use crate::services::analytics::matches_search;
use crate::services::UserSummary;
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

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/users", get(list_users))
}

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Template)]
#[template(path = "dashboard/users.html")]
struct UsersPage {
    layout: Layout,
    users: Vec<User>,
    summary: UserSummary,
    q: String,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<UsersQuery>,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/dashboard/users", jar).await;

    let mut users = match state.db.list_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching users");
            layout.push(Notice::error("Failed to load users"));
            Vec::new()
        }
    };

    // Summary covers everyone, the table only the matches
    let summary = UserSummary::from_users(&users);
    users.retain(|u| matches_search(&u.name, &u.email, &query.q));

    let page = UsersPage {
        layout,
        users,
        summary,
        q: query.q,
    };
    Ok((jar, render(&page)?))
}
