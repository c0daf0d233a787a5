// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Lead inbox.

use crate::error::{AppError, Result};
use crate::middleware::Session;
use crate::models::Lead;
use crate::notice::{self, Notice};
use crate::services::analytics::matches_search;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/leads", get(list_leads))
        .route("/dashboard/leads/{id}/read", post(mark_read))
}

#[derive(Debug, Default, Deserialize)]
pub struct LeadsQuery {
    #[serde(default)]
    pub q: String,
    /// Lead to open in the detail pane
    #[serde(default)]
    pub lead: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/leads.html")]
struct LeadsPage {
    layout: Layout,
    leads: Vec<Lead>,
    selected: Option<Lead>,
    q: String,
    unread: usize,
}

/// Leads newest first, filtered by `q`. Opening a lead marks it read.
async fn list_leads(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<LeadsQuery>,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/dashboard/leads", jar).await;

    let mut leads = match state.db.list_leads().await {
        Ok(leads) => leads,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching leads");
            layout.push(Notice::error("Failed to load leads"));
            Vec::new()
        }
    };

    let mut selected = None;
    if let Some(lead_id) = query.lead.as_deref() {
        if let Some(lead) = leads.iter_mut().find(|l| l.doc_id() == lead_id) {
            if !lead.read {
                match state.db.mark_lead_read(lead_id).await {
                    Ok(()) => lead.read = true,
                    Err(e) => {
                        tracing::error!(lead_id, error = %e, "Error marking lead as read");
                        layout.push(Notice::error("Failed to mark as read"));
                    }
                }
            }
            selected = Some(lead.clone());
        }
    }

    let unread = leads.iter().filter(|l| !l.read).count();
    leads.retain(|l| matches_search(&l.name, &l.email, &query.q));

    let page = LeadsPage {
        layout,
        leads,
        selected,
        q: query.q,
        unread,
    };
    Ok((jar, render(&page)?))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(lead_id): Path<String>,
) -> impl IntoResponse {
    let jar = match state.db.mark_lead_read(&lead_id).await {
        Ok(()) => {
            tracing::info!(lead_id = %lead_id, "Lead marked as read");
            jar
        }
        Err(AppError::NotFound(_)) => notice::set(jar, Notice::error("Lead not found")),
        Err(e) => {
            tracing::error!(lead_id = %lead_id, error = %e, "Error marking lead as read");
            notice::set(jar, Notice::error("Failed to mark as read"))
        }
    };
    (jar, Redirect::to("/dashboard/leads"))
}
