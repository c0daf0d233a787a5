// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Public marketing pages.

use crate::content::{self, Highlight, Service, Stat, TeamMember};
use crate::error::Result;
use crate::middleware::Session;
use crate::models::review::{average_rating, star_text};
use crate::models::Review;
use crate::notice::Notice;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/services", get(services))
        .route("/about", get(about))
        .route("/ratings", get(ratings))
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    layout: Layout,
    services: &'static [Service],
    reasons: &'static [&'static str],
}

async fn home(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, layout) = Layout::load(&state, &session, "/", jar).await;
    let page = HomePage {
        layout,
        services: &content::HOME_SERVICES,
        reasons: &content::HOME_REASONS,
    };
    Ok((jar, render(&page)?))
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesPage {
    layout: Layout,
    services: &'static [Service],
    stats: &'static [Stat],
}

async fn services(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, layout) = Layout::load(&state, &session, "/services", jar).await;
    let page = ServicesPage {
        layout,
        services: &content::SERVICES,
        stats: &content::SERVICE_STATS,
    };
    Ok((jar, render(&page)?))
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutPage {
    layout: Layout,
    story: &'static [&'static str],
    mission: &'static str,
    vision: &'static str,
    values: &'static [Highlight],
    reasons: &'static [Highlight],
    team: &'static [TeamMember],
}

async fn about(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, layout) = Layout::load(&state, &session, "/about", jar).await;
    let page = AboutPage {
        layout,
        story: &content::STORY,
        mission: content::MISSION,
        vision: content::VISION,
        values: &content::VALUES,
        reasons: &content::REASONS,
        team: &content::TEAM,
    };
    Ok((jar, render(&page)?))
}

#[derive(Template)]
#[template(path = "ratings.html")]
struct RatingsPage {
    layout: Layout,
    reviews: Vec<Review>,
    average: String,
    average_stars: String,
}

/// Public reviews, newest first, with the rounded average.
async fn ratings(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, mut layout) = Layout::load(&state, &session, "/ratings", jar).await;

    let reviews = match state.db.list_reviews().await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching reviews");
            layout.push(Notice::error("Failed to load reviews"));
            Vec::new()
        }
    };

    let average = average_rating(&reviews);
    let page = RatingsPage {
        layout,
        average: format!("{:.1}", average),
        average_stars: star_text(average),
        reviews,
    };
    Ok((jar, render(&page)?))
}
