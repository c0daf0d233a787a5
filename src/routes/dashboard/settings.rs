// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Site settings editor and admin password change.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::settings::DayHours;
use crate::models::SettingsUpdate;
use crate::notice::{self, Notice};
use crate::services::IdentityError;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/settings", get(settings_page).post(save_settings))
        .route("/dashboard/settings/password", post(change_password))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsTab {
    #[default]
    Seo,
    Business,
    Hours,
    Password,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::Seo,
        SettingsTab::Business,
        SettingsTab::Hours,
        SettingsTab::Password,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SettingsTab::Seo => "seo",
            SettingsTab::Business => "business",
            SettingsTab::Hours => "hours",
            SettingsTab::Password => "password",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::Seo => "SEO Settings",
            SettingsTab::Business => "Business Details",
            SettingsTab::Hours => "Working Hours",
            SettingsTab::Password => "Change Password",
        }
    }

    fn url(&self) -> String {
        format!("/dashboard/settings?tab={}", self.id())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    pub tab: SettingsTab,
}

#[derive(Template)]
#[template(path = "dashboard/settings.html")]
struct SettingsPage {
    layout: Layout,
    tab: SettingsTab,
    tabs: [SettingsTab; 4],
    hours: Vec<DayHours>,
}

async fn settings_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<TabQuery>,
) -> Result<impl IntoResponse> {
    let (jar, layout) = Layout::load(&state, &session, "/dashboard/settings", jar).await;
    let page = SettingsPage {
        hours: layout.settings.hours(),
        layout,
        tab: query.tab,
        tabs: SettingsTab::ALL,
    };
    Ok((jar, render(&page)?))
}

/// Save the fields posted by one tab as a single partial update.
async fn save_settings(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<TabQuery>,
    Form(update): Form<SettingsUpdate>,
) -> impl IntoResponse {
    let update = update.trimmed();

    let notice = if update.is_empty() {
        Notice::info("No changes to save")
    } else {
        match state.settings.update(&update).await {
            Ok(_) => Notice::success("Settings saved successfully!"),
            Err(e) => {
                tracing::error!(error = %e, "Error saving settings");
                Notice::error("Failed to save settings")
            }
        }
    };

    (notice::set(jar, notice), Redirect::to(&query.tab.url()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordForm {
    /// First problem with the form, checked in display order.
    pub fn problem(&self) -> Option<&'static str> {
        if self.current_password.is_empty() {
            Some("Please enter your current password")
        } else if self.new_password.is_empty() {
            Some("Please enter a new password")
        } else if self.new_password.chars().count() < 6 {
            Some("New password must be at least 6 characters")
        } else if self.new_password != self.confirm_password {
            Some("Passwords do not match")
        } else {
            None
        }
    }
}

/// Change the signed-in admin's password (re-authenticate, then update).
async fn change_password(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> impl IntoResponse {
    let back = SettingsTab::Password.url();
    let Some(user) = session.user() else {
        return (jar, Redirect::to("/login"));
    };

    if let Some(problem) = form.problem() {
        return (notice::set(jar, Notice::error(problem)), Redirect::to(&back));
    }

    let notice = match state
        .identity
        .change_password(&user.email, &form.current_password, &form.new_password)
        .await
    {
        Ok(()) => Notice::success("Password updated successfully!"),
        Err(e) if e.is_bad_credentials() => Notice::error("Current password is incorrect"),
        Err(e) => {
            tracing::warn!(uid = %user.uid, error = %e, "Password change failed");
            match e {
                IdentityError::Rejected { .. } => Notice::error(e.user_message()),
                _ => Notice::error("Failed to change password"),
            }
        }
    };

    (notice::set(jar, notice), Redirect::to(&back))
}
