// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! User model for storage and session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account role. Anything other than `Admin` is treated as an ordinary user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

// Null, missing and unrecognised values all read as `User`.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(match value.as_deref() {
            Some("admin") => Role::Admin,
            _ => Role::User,
        })
    }
}

/// User profile stored in Firestore (`users/{uid}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Auth provider UID (also used as document ID)
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Empty when the user has not added one yet
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    #[serde(default, with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New ordinary account with no phone on file.
    pub fn new(uid: &str, name: &str, email: &str, photo_url: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            uid: uid.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            role: Role::User,
            photo_url: photo_url.to_string(),
            created_at,
        }
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }
}

/// Profile fields the owning user may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: String,
    pub phone: String,
}

impl ProfilePatch {
    pub const FIELDS: [&'static str; 2] = ["name", "phone"];
}

/// Signed-in identity with the stored profile merged on top.
///
/// `role` is `None` when the profile document could not be fetched; such a
/// session is never considered an admin.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub photo_url: String,
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Display name for headers and form prefill.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
