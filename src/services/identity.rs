// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Firebase Authentication client (Identity Toolkit REST API).
//!
//! Handles:
//! - Email/password sign-up and sign-in
//! - Google federated sign-in (`accounts:signInWithIdp`)
//! - Display name and password changes (`accounts:update`)

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Firebase Auth is not initialized. Please check your Firebase configuration.")]
    NotInitialized,

    /// The service answered with an error code such as `EMAIL_EXISTS`.
    #[error("Authentication rejected: {code}")]
    Rejected { code: String, message: String },

    #[error("Authentication request failed: {0}")]
    Transport(String),
}

impl IdentityError {
    /// Message suitable for showing to the person signing in.
    pub fn user_message(&self) -> &'static str {
        match self {
            IdentityError::NotInitialized => {
                "Sign-in is unavailable right now. Please try again later."
            }
            IdentityError::Rejected { code, .. } => match code.as_str() {
                "EMAIL_EXISTS" => "An account with this email already exists",
                "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" => {
                    "Invalid email or password"
                }
                "INVALID_EMAIL" => "Please enter a valid email address",
                "WEAK_PASSWORD" => "Password must be at least 6 characters",
                "USER_DISABLED" => "This account has been disabled",
                "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please try again later.",
                "INVALID_IDP_RESPONSE" | "INVALID_ID_TOKEN" => "Google sign-in failed",
                "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED" => {
                    "Please sign in again to continue"
                }
                _ => "Authentication failed. Please try again.",
            },
            IdentityError::Transport(_) => "Unable to reach the sign-in service. Please try again.",
        }
    }

    /// Whether the error means the supplied credentials were wrong.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(
            self,
            IdentityError::Rejected { code, .. }
                if matches!(
                    code.as_str(),
                    "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD"
                )
        )
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected { .. } => AppError::BadRequest(err.user_message().to_string()),
            _ => AppError::Identity(err.to_string()),
        }
    }
}

/// Account returned by a successful sign-up or sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    #[serde(rename = "localId")]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Clone)]
struct Endpoint {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    request_uri: String,
}

/// Identity Toolkit client.
///
/// Built without credentials (`new_mock`, or missing Firebase config) every
/// call fails with [`IdentityError::NotInitialized`].
#[derive(Clone)]
pub struct IdentityClient {
    endpoint: Option<Endpoint>,
}

impl IdentityClient {
    /// Create a client from configuration.
    ///
    /// Honors `FIREBASE_AUTH_EMULATOR_HOST`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let Some(firebase) = config.firebase.as_ref() else {
            tracing::warn!("Firebase Auth not configured, sign-in disabled");
            return Ok(Self::new_mock());
        };

        let base_url = match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) if !host.is_empty() => {
                tracing::info!(host = %host, "Using Firebase Auth emulator");
                format!("http://{}/identitytoolkit.googleapis.com/v1", host)
            }
            _ => IDENTITY_TOOLKIT_URL.to_string(),
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: Some(Endpoint {
                http,
                base_url,
                api_key: firebase.api_key.clone(),
                request_uri: config.site_url.clone(),
            }),
        })
    }

    /// Client with no backing service.
    pub fn new_mock() -> Self {
        Self { endpoint: None }
    }

    /// Create an email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthAccount, IdentityError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.call("accounts:signUp", &body).await
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthAccount, IdentityError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.call("accounts:signInWithPassword", &body).await
    }

    /// Exchange a Google ID token for a Firebase account, creating the
    /// account on first use.
    pub async fn sign_in_with_idp(&self, google_id_token: &str) -> Result<AuthAccount, IdentityError> {
        let endpoint = self.endpoint()?;
        let body = IdpRequest {
            post_body: format!(
                "id_token={}&providerId=google.com",
                urlencoding::encode(google_id_token)
            ),
            request_uri: &endpoint.request_uri,
            return_idp_credential: true,
            return_secure_token: true,
        };
        self.call("accounts:signInWithIdp", &body).await
    }

    /// Set the display name on an account.
    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<(), IdentityError> {
        let body = UpdateRequest {
            id_token,
            display_name: Some(display_name),
            password: None,
            return_secure_token: false,
        };
        let _: serde_json::Value = self.call("accounts:update", &body).await?;
        Ok(())
    }

    /// Change the password of `email` after verifying `current_password`.
    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let account = self.sign_in_with_password(email, current_password).await?;

        let body = UpdateRequest {
            id_token: &account.id_token,
            display_name: None,
            password: Some(new_password),
            return_secure_token: true,
        };
        let _: serde_json::Value = self.call("accounts:update", &body).await?;

        tracing::info!(uid = %account.uid, "Password changed");
        Ok(())
    }

    fn endpoint(&self) -> Result<&Endpoint, IdentityError> {
        self.endpoint.as_ref().ok_or(IdentityError::NotInitialized)
    }

    async fn call<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, IdentityError> {
        let endpoint = self.endpoint()?;
        let url = format!("{}/{}", endpoint.base_url, method);

        let response = endpoint
            .http
            .post(&url)
            .query(&[("key", endpoint.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, IdentityError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(parse_error_body(status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| IdentityError::Transport(format!("JSON parse error: {}", e)))
}

/// Turn an Identity Toolkit error body into an [`IdentityError`].
///
/// Messages look like `"WEAK_PASSWORD : Password should be at least 6 characters"`;
/// the code is the part before the first ` : `.
fn parse_error_body(status: reqwest::StatusCode, body: &str) -> IdentityError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            let message = envelope.error.message;
            let code = message
                .split(" : ")
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            IdentityError::Rejected { code, message }
        }
        _ => IdentityError::Transport(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_code_with_detail() {
        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        match parse_error_body(reqwest::StatusCode::BAD_REQUEST, body) {
            IdentityError::Rejected { code, .. } => assert_eq!(code, "WEAK_PASSWORD"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_plain_code() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#;
        let err = parse_error_body(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(err.user_message(), "An account with this email already exists");
    }

    #[test]
    fn test_non_json_error_is_transport() {
        let err = parse_error_body(reqwest::StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, IdentityError::Transport(_)));
    }

    #[test]
    fn test_bad_credentials_codes() {
        for code in ["INVALID_LOGIN_CREDENTIALS", "EMAIL_NOT_FOUND", "INVALID_PASSWORD"] {
            let err = IdentityError::Rejected {
                code: code.to_string(),
                message: code.to_string(),
            };
            assert!(err.is_bad_credentials());
            assert_eq!(err.user_message(), "Invalid email or password");
        }
    }

    #[test]
    fn test_rejection_maps_to_bad_request() {
        let err = IdentityError::Rejected {
            code: "USER_DISABLED".into(),
            message: "USER_DISABLED".into(),
        };
        assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
        assert!(matches!(
            AppError::from(IdentityError::NotInitialized),
            AppError::Identity(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_client_is_not_initialized() {
        let client = IdentityClient::new_mock();
        let err = client.sign_in_with_password("a@b.c", "secret").await.unwrap_err();
        assert!(matches!(err, IdentityError::NotInitialized));
    }

    #[test]
    fn test_account_deserializes_rest_fields() {
        let json = r#"{"localId":"u1","email":"a@b.c","displayName":"Ana","photoUrl":"https://p","idToken":"tok","registered":true}"#;
        let account: AuthAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.uid, "u1");
        assert_eq!(account.display_name, "Ana");
        assert_eq!(account.photo_url, "https://p");
        assert_eq!(account.id_token, "tok");
    }
}
