// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! HTTP route handlers.

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod pages;
pub mod profile;

use crate::middleware::{load_session, require_admin, track_visits};
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// Whether a Firestore connection was configured at start-up
    pub database: bool,
}

/// Health check response
async fn health_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        database: state.db.is_connected(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public pages (visit tracking applies here only)
    let site_routes = Router::new()
        .merge(pages::routes())
        .merge(contact::routes())
        .merge(auth::routes())
        .merge(profile::routes())
        .layer(middleware::from_fn_with_state(state.clone(), track_visits));

    // Admin console (role gate on every route, pages and form posts alike)
    let admin_routes =
        dashboard::routes().route_layer(middleware::from_fn(require_admin));

    // Sessions are resolved for pages only; health and static assets skip
    // the profile lookup.
    let session_routes = Router::new()
        .merge(site_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), load_session));

    Router::new()
        .route("/health", get(health_check))
        .nest_service("/static", ServeDir::new("static"))
        .merge(session_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
