// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! One-shot flash notices carried across a redirect in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const NOTICE_COOKIE: &str = "mitc_notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    /// CSS modifier used by the layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(NoticeKind::Success),
            "error" => Some(NoticeKind::Error),
            "info" => Some(NoticeKind::Info),
            _ => None,
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.kind.as_str()
    }

    // The cookie jar percent-encodes values on the way out and decodes them
    // on the way in, so the stored form is plain `kind:message`.
    fn encode(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.message)
    }

    fn decode(value: &str) -> Option<Self> {
        let (kind, message) = value.split_once(':')?;
        Some(Self {
            kind: NoticeKind::parse(kind)?,
            message: message.to_string(),
        })
    }
}

/// Queue `notice` for the next page view.
pub fn set(jar: CookieJar, notice: Notice) -> CookieJar {
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read and clear the pending notice, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(value) = jar.get(NOTICE_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/"));
    (jar, Notice::decode(&value))
}
