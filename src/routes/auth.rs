// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Account routes: sign-up, login, Google sign-in and logout.

use crate::error::{AppError, Result};
use crate::middleware::auth::{end_session, start_session};
use crate::middleware::Session;
use crate::models::User;
use crate::notice::{self, Notice};
use crate::services::IdentityError;
use crate::time_utils;
use crate::views::{render, Layout};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", get(signup_page).post(signup))
        .route("/login", get(login_page).post(login))
        .route("/auth/google", post(google_callback))
        .route("/auth/logout", get(logout))
}

const MIN_PASSWORD_LEN: usize = 6;
const GOOGLE_CSRF_COOKIE: &str = "g_csrf_token";

// ─── Sign-up ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl SignupForm {
    /// First problem with the submitted passwords, if any.
    pub fn password_problem(&self) -> Option<&'static str> {
        if self.password != self.confirm_password {
            Some("Passwords do not match")
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            Some("Password must be at least 6 characters")
        } else {
            None
        }
    }
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignupPage {
    layout: Layout,
    name: String,
    email: String,
}

async fn signup_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<Response> {
    if session.user().is_some() {
        return Ok(Redirect::to("/profile").into_response());
    }
    let (jar, layout) = Layout::load(&state, &session, "/signup", jar).await;
    let page = SignupPage {
        layout,
        name: String::new(),
        email: String::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

/// Create an account, its profile document and a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_string();

    if let Some(problem) = form.password_problem() {
        return signup_failure(&state, &session, jar, StatusCode::BAD_REQUEST, problem, name, email)
            .await;
    }

    let account = match state.identity.sign_up(&email, &form.password).await {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(error = %e, "Signup rejected");
            let status = identity_status(&e);
            return signup_failure(&state, &session, jar, status, e.user_message(), name, email)
                .await;
        }
    };

    if !name.is_empty() {
        if let Err(e) = state
            .identity
            .update_display_name(&account.id_token, &name)
            .await
        {
            tracing::warn!(uid = %account.uid, error = %e, "Failed to set display name");
        }
    }

    let user = User::new(&account.uid, &name, &email, "", time_utils::now());
    if let Err(e) = state.db.upsert_user(&user).await {
        tracing::error!(uid = %account.uid, error = %e, "Error creating user profile");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        return signup_failure(&state, &session, jar, status, "Signup failed", name, email).await;
    }

    tracing::info!(uid = %account.uid, "User signed up");
    let jar = start_session(jar, &state.config, &account.uid, &email, &name)?;
    let jar = notice::set(jar, Notice::success("Signup successful!"));
    Ok((jar, Redirect::to("/profile")).into_response())
}

/// Re-render the sign-up form with an error, keeping name and email.
async fn signup_failure(
    state: &AppState,
    session: &Session,
    jar: CookieJar,
    status: StatusCode,
    message: &str,
    name: String,
    email: String,
) -> Result<Response> {
    let (jar, mut layout) = Layout::load(state, session, "/signup", jar).await;
    layout.push(Notice::error(message));
    let page = SignupPage { layout, name, email };
    Ok((status, jar, render(&page)?).into_response())
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage {
    layout: Layout,
    email: String,
}

async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> Result<Response> {
    if session.user().is_some() {
        return Ok(Redirect::to("/profile").into_response());
    }
    let (jar, layout) = Layout::load(&state, &session, "/login", jar).await;
    let page = LoginPage {
        layout,
        email: String::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = form.email.trim().to_string();

    match state
        .identity
        .sign_in_with_password(&email, &form.password)
        .await
    {
        Ok(account) => {
            tracing::info!(uid = %account.uid, "User logged in");
            let jar = start_session(
                jar,
                &state.config,
                &account.uid,
                &account.email,
                &account.display_name,
            )?;
            let jar = notice::set(jar, Notice::success("Login successful!"));
            Ok((jar, Redirect::to("/profile")).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            let (jar, mut layout) = Layout::load(&state, &session, "/login", jar).await;
            layout.push(Notice::error(e.user_message()));
            let page = LoginPage { layout, email };
            Ok((identity_status(&e), jar, render(&page)?).into_response())
        }
    }
}

// ─── Google sign-in ──────────────────────────────────────────

/// Form posted by the Google Identity Services button.
#[derive(Debug, Deserialize)]
pub struct GoogleCredentialForm {
    pub credential: String,
    #[serde(default)]
    pub g_csrf_token: String,
}

/// Double-submit check: the posted token must equal the cookie GIS set.
pub fn csrf_token_matches(cookie: Option<&str>, posted: &str) -> bool {
    match cookie {
        Some(cookie) if !cookie.is_empty() && !posted.is_empty() => {
            cookie.as_bytes().ct_eq(posted.as_bytes()).into()
        }
        _ => false,
    }
}

/// Exchange a Google credential for a session. Existing profiles (and their
/// roles) are left untouched; only first sign-ins create one.
async fn google_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<GoogleCredentialForm>,
) -> Result<Response> {
    let cookie_token = jar.get(GOOGLE_CSRF_COOKIE).map(|c| c.value().to_string());
    if !csrf_token_matches(cookie_token.as_deref(), &form.g_csrf_token) {
        tracing::warn!("Google sign-in CSRF token mismatch");
        return Err(AppError::BadRequest(
            "Failed to verify sign-in request".to_string(),
        ));
    }

    let account = match state.identity.sign_in_with_idp(&form.credential).await {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in rejected");
            let jar = notice::set(jar, Notice::error(e.user_message()));
            return Ok((jar, Redirect::to("/login")).into_response());
        }
    };

    let user = User::new(
        &account.uid,
        &account.display_name,
        &account.email,
        &account.photo_url,
        time_utils::now(),
    );
    let created = match state.db.create_user_if_absent(&user).await {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(uid = %account.uid, error = %e, "Error creating user profile");
            let jar = notice::set(jar, Notice::error("Google sign-in failed"));
            return Ok((jar, Redirect::to("/login")).into_response());
        }
    };

    tracing::info!(uid = %account.uid, new_user = created, "Google sign-in");
    let jar = start_session(
        jar,
        &state.config,
        &account.uid,
        &account.email,
        &account.display_name,
    )?;
    let message = if created {
        "Signup successful!"
    } else {
        "Login successful!"
    };
    let jar = notice::set(jar, Notice::success(message));
    Ok((jar, Redirect::to("/profile")).into_response())
}

// ─── Logout ──────────────────────────────────────────────────

async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = end_session(jar);
    let jar = notice::set(jar, Notice::success("Logged out successfully"));
    (jar, Redirect::to("/"))
}

fn identity_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::Rejected { .. } => StatusCode::BAD_REQUEST,
        IdentityError::NotInitialized | IdentityError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_password_checks_in_order() {
        assert_eq!(
            form("abc", "abd").password_problem(),
            Some("Passwords do not match")
        );
        assert_eq!(
            form("abc", "abc").password_problem(),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(form("abcdef", "abcdef").password_problem(), None);
    }

    #[test]
    fn test_csrf_token_matches() {
        assert!(csrf_token_matches(Some("tok123"), "tok123"));
        assert!(!csrf_token_matches(Some("tok123"), "tok124"));
        assert!(!csrf_token_matches(Some("tok123"), "tok"));
        assert!(!csrf_token_matches(None, "tok123"));
        assert!(!csrf_token_matches(Some(""), ""));
    }
}
