// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Session cookie handling and the admin role gate.

use crate::config::Config;
use crate::models::{CurrentUser, Role};
use crate::notice::{self, Notice};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "mitc_session";
const SESSION_DAYS: i64 = 30;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (auth provider UID)
    pub sub: String,
    #[serde(default)]
    pub email: String,
    /// Display name at sign-in time
    #[serde(default)]
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Create a JWT for a user session.
pub fn create_session_token(
    uid: &str,
    email: &str,
    name: &str,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        iat: now,
        exp: now + SESSION_DAYS as usize * 24 * 60 * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a session token. Expired or tampered tokens yield `None`.
pub fn decode_session_token(token: &str, signing_key: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            None
        }
    }
}

/// Cookie carrying a freshly issued session.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .max_age(time::Duration::days(SESSION_DAYS))
        .build()
}

/// Issue a session for `uid` and attach it to `jar`.
pub fn start_session(
    jar: CookieJar,
    config: &Config,
    uid: &str,
    email: &str,
    name: &str,
) -> crate::error::Result<CookieJar> {
    let token = create_session_token(uid, email, name, &config.jwt_signing_key)
        .map_err(|e| crate::error::AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;
    Ok(jar.add(session_cookie(token, config)))
}

/// Drop the session cookie.
pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Session state for the current request (`None` when signed out).
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<CurrentUser>);

impl Session {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(CurrentUser::is_admin)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// Extractor for handlers that need a signed-in user; redirects to `/login`
/// otherwise.
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .and_then(|s| s.0.clone())
            .map(RequireUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Build the session identity from token claims and the stored profile.
///
/// A failed profile read keeps the user signed in but without a role, so
/// they are never treated as an admin.
pub async fn resolve_session(state: &AppState, claims: Claims) -> CurrentUser {
    let mut user = CurrentUser {
        uid: claims.sub,
        email: claims.email,
        name: claims.name,
        phone: String::new(),
        photo_url: String::new(),
        role: None,
    };

    match state.db.get_user(&user.uid).await {
        Ok(Some(profile)) => {
            if !profile.name.is_empty() {
                user.name = profile.name;
            }
            if user.email.is_empty() {
                user.email = profile.email;
            }
            user.phone = profile.phone;
            user.photo_url = profile.photo_url;
            user.role = Some(profile.role);
        }
        Ok(None) => {
            user.role = Some(Role::User);
        }
        Err(e) => {
            tracing::warn!(uid = %user.uid, error = %e, "Error fetching user profile");
        }
    }

    user
}

/// Middleware that attaches the [`Session`] to every request.
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|c| decode_session_token(c.value(), &state.config.jwt_signing_key));

    let session = match claims {
        Some(claims) => Session(Some(resolve_session(&state, claims).await)),
        None => Session(None),
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Middleware that lets only admins through; everyone else is sent home
/// with a notice.
pub async fn require_admin(jar: CookieJar, request: Request, next: Next) -> Response {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .unwrap_or_default();

    if !session.is_admin() {
        tracing::info!(
            uid = session.user().map(|u| u.uid.as_str()).unwrap_or("anonymous"),
            path = %request.uri().path(),
            "Admin access denied"
        );
        let jar = notice::set(jar, Notice::error("Admin access required"));
        return (jar, Redirect::to("/")).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

    #[test]
    fn test_session_token_round_trip() {
        let token = create_session_token("uid-1", "a@example.com", "Ana", KEY).unwrap();
        let claims = decode_session_token(&token, KEY).expect("valid token");
        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_with_other_key_is_rejected() {
        let token = create_session_token("uid-1", "", "", KEY).unwrap();
        assert!(decode_session_token(&token, b"another_key_that_is_32_bytes!!!!").is_none());
        assert!(decode_session_token("not-a-jwt", KEY).is_none());
    }

    #[test]
    fn test_session_cookie_flags() {
        let mut config = Config::test_default();
        let cookie = session_cookie("tok".into(), &config);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));

        config.site_url = "https://mitc.example.com".into();
        assert_eq!(session_cookie("tok".into(), &config).secure(), Some(true));
    }

    #[tokio::test]
    async fn test_profile_fetch_failure_drops_role() {
        let state = AppState::for_tests();
        let claims = Claims {
            sub: "uid-1".into(),
            email: "a@example.com".into(),
            name: "Ana".into(),
            exp: 0,
            iat: 0,
        };

        let user = resolve_session(&state, claims).await;
        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, None);
        assert!(!user.is_admin());
    }
}
