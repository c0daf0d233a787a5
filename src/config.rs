// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Application configuration loaded from environment variables.
//!
//! The Firebase values are public client configuration. When they are
//! missing the server still starts, but database and auth access is
//! blocked at runtime with an explicit error.

use std::env;

/// Public Firebase project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseConfig {
    /// Read `FIREBASE_*` variables. Returns `None` (with a warning) when the
    /// API key or project ID is absent.
    fn from_env() -> Option<Self> {
        let api_key = env::var("FIREBASE_API_KEY").ok().filter(|v| !v.trim().is_empty());
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let (Some(api_key), Some(project_id)) = (api_key, project_id) else {
            tracing::warn!(
                "Firebase config missing. Please set FIREBASE_API_KEY and FIREBASE_PROJECT_ID; \
                 database and sign-in are disabled until then"
            );
            return None;
        };

        Some(Self {
            auth_domain: env::var("FIREBASE_AUTH_DOMAIN")
                .unwrap_or_else(|_| format!("{}.firebaseapp.com", project_id)),
            storage_bucket: env::var("FIREBASE_STORAGE_BUCKET").unwrap_or_default(),
            messaging_sender_id: env::var("FIREBASE_MESSAGING_SENDER_ID").unwrap_or_default(),
            app_id: env::var("FIREBASE_APP_ID").unwrap_or_default(),
            api_key: api_key.trim().to_string(),
            project_id: project_id.trim().to_string(),
        })
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase client configuration; `None` blocks database and auth access
    pub firebase: Option<FirebaseConfig>,
    /// OAuth client ID for Google Identity Services sign-in button
    pub google_client_id: Option<String>,
    /// Public base URL of the site (used for cookie flags and IdP redirects)
    pub site_url: String,
    /// Server port
    pub port: u16,
    /// Session JWT signing key (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();
        if jwt_signing_key.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_SIGNING_KEY must be at least 32 bytes",
            ));
        }

        Ok(Self {
            firebase: FirebaseConfig::from_env(),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            site_url: env::var("SITE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key,
        })
    }

    /// Default config for testing only. Firebase is left unconfigured.
    pub fn test_default() -> Self {
        Self {
            firebase: None,
            google_client_id: None,
            site_url: "http://localhost:8080".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }

    /// Project ID for Firestore, if configured.
    pub fn project_id(&self) -> Option<&str> {
        self.firebase.as_ref().map(|f| f.project_id.as_str())
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
