// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Shared page layout data and template rendering.

use askama::Template;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::error::{AppError, Result};
use crate::middleware::Session;
use crate::models::{CurrentUser, SiteSettings};
use crate::notice::{self, Notice};
use crate::AppState;

/// Everything `base.html` needs: settings, session, notices and navigation.
#[derive(Debug, Clone)]
pub struct Layout {
    pub settings: SiteSettings,
    pub user: Option<CurrentUser>,
    pub notices: Vec<Notice>,
    pub current_path: String,
    pub google_client_id: Option<String>,
    /// Public base URL, for absolute links such as the Google sign-in callback
    pub site_url: String,
    pub year: i32,
}

impl Layout {
    /// Build the layout for `path`, consuming any pending flash notice.
    pub async fn load(
        state: &AppState,
        session: &Session,
        path: &str,
        jar: CookieJar,
    ) -> (CookieJar, Self) {
        let loaded = state.settings.load().await;
        let (jar, flash) = notice::take(jar);

        let mut notices: Vec<Notice> = flash.into_iter().collect();
        if let Some(error) = loaded.error {
            notices.push(Notice::error(error));
        }

        let layout = Self {
            settings: loaded.settings,
            user: session.0.clone(),
            notices,
            current_path: path.to_string(),
            google_client_id: state.config.google_client_id.clone(),
            site_url: state.config.site_url.clone(),
            year: chrono::Datelike::year(&chrono::Utc::now()),
        };
        (jar, layout)
    }

    /// Add a notice rendered on this response only.
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(CurrentUser::is_admin)
    }

    pub fn user_name(&self) -> &str {
        self.user
            .as_ref()
            .map(CurrentUser::display_name)
            .unwrap_or_default()
    }

    /// `active` for the nav entry matching the current page.
    pub fn nav_class(&self, path: &str) -> &'static str {
        let active = if path == "/" {
            self.current_path == "/"
        } else {
            self.current_path.starts_with(path)
        };
        if active {
            "active"
        } else {
            ""
        }
    }

    pub fn whatsapp_url(&self) -> Option<String> {
        self.settings.whatsapp_url()
    }

    pub fn phone_href(&self) -> String {
        let phone: String = self
            .settings
            .sales_person_phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", phone)
    }
}

/// Render a template to an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render error: {}", e)))
}

/// Flatten validator errors into their messages, sorted by field name.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", e.code))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn layout(path: &str) -> Layout {
        Layout {
            settings: SiteSettings::default(),
            user: None,
            notices: Vec::new(),
            current_path: path.to_string(),
            google_client_id: None,
            site_url: "http://localhost:8080".to_string(),
            year: 2026,
        }
    }

    #[test]
    fn test_nav_class() {
        let l = layout("/dashboard/leads");
        assert_eq!(l.nav_class("/dashboard"), "active");
        assert_eq!(l.nav_class("/"), "");
        assert_eq!(layout("/").nav_class("/"), "active");
    }

    #[test]
    fn test_admin_flag_follows_role() {
        let mut l = layout("/");
        assert!(!l.signed_in());
        assert!(!l.is_admin());

        l.user = Some(CurrentUser {
            uid: "u".into(),
            email: "a@example.com".into(),
            name: String::new(),
            phone: String::new(),
            photo_url: String::new(),
            role: Some(Role::Admin),
        });
        assert!(l.is_admin());
        assert_eq!(l.user_name(), "a@example.com");
    }

    #[test]
    fn test_phone_href_keeps_digits_and_plus() {
        let mut l = layout("/");
        l.settings.sales_person_phone = "+91 (194) 555-0100".into();
        assert_eq!(l.phone_href(), "tel:+911945550100");
    }
}
