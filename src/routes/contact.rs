// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Contact form: creates a lead for the sales team.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::settings::DayHours;
use crate::models::ContactForm;
use crate::notice::{self, Notice};
use crate::time_utils;
use crate::views::{render, validation_messages, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/contact", get(contact_page).post(submit_contact))
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactPage {
    layout: Layout,
    form: ContactForm,
    hours: Vec<DayHours>,
    location: &'static str,
}

fn contact_page_view(layout: Layout, form: ContactForm) -> ContactPage {
    ContactPage {
        hours: layout.settings.hours(),
        location: crate::content::LOCATION,
        layout,
        form,
    }
}

/// Contact page, prefilled from the session when signed in.
async fn contact_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    let (jar, layout) = Layout::load(&state, &session, "/contact", jar).await;

    let form = session
        .user()
        .map(|u| ContactForm {
            name: u.name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            message: String::new(),
        })
        .unwrap_or_default();

    Ok((jar, render(&contact_page_view(layout, form))?))
}

/// Validate and store a contact submission.
///
/// Phone is checked first; no document is written unless every check passes.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let form = form.normalized();

    let mut problems = Vec::new();
    if form.phone.is_empty() {
        problems.push(Notice::error("Phone number is required for contact"));
        if session.user().is_some() {
            problems.push(Notice::info(
                "Please add your phone number to your profile",
            ));
        }
    } else if let Err(errors) = form.validate() {
        problems.extend(validation_messages(&errors).into_iter().map(Notice::error));
    }

    if !problems.is_empty() {
        let (jar, mut layout) = Layout::load(&state, &session, "/contact", jar).await;
        for problem in problems {
            layout.push(problem);
        }
        let page = contact_page_view(layout, form);
        return Ok((StatusCode::BAD_REQUEST, jar, render(&page)?).into_response());
    }

    let user_id = session.user().map(|u| u.uid.clone());
    let lead = form.clone().into_lead(user_id, time_utils::now());

    match state.db.create_lead(&lead).await {
        Ok(created) => {
            tracing::info!(lead_id = %created.doc_id(), "Lead created");
            let jar = notice::set(
                jar,
                Notice::success("Message sent successfully! We'll get back to you soon."),
            );
            Ok((jar, Redirect::to("/contact")).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Error submitting contact form");
            let (jar, mut layout) = Layout::load(&state, &session, "/contact", jar).await;
            layout.push(Notice::error("Failed to send message. Please try again."));
            let page = contact_page_view(layout, form);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, jar, render(&page)?).into_response())
        }
    }
}
