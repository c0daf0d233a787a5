// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Pages are server-rendered; the only third-party origin is Google Identity
/// Services for the sign-in button.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' https://accounts.google.com/gsi/client; \
     style-src 'self' 'unsafe-inline' https://accounts.google.com/gsi/style; \
     frame-src https://accounts.google.com/gsi/; \
     connect-src 'self' https://accounts.google.com/gsi/; \
     img-src 'self' data: https:; \
     form-action 'self'; \
     frame-ancestors 'none'";

/// Add security headers to all responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Strict-Transport-Security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    // Google sign-in needs the origin on the referrer
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("accelerometer=(), camera=(), geolocation=(), gyroscope=(), magnetometer=(), microphone=(), payment=(), usb=()"),
    );

    response
}
