// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Contact-form submissions ("leads").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lead stored in Firestore (`leads/{auto-id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Firestore document ID (read-only, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    /// Submitting user, if signed in. Not validated against `users`.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn doc_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// `wa.me` link built from the digits of the phone number.
    pub fn whatsapp_url(&self) -> Option<String> {
        whatsapp_url(&self.phone)
    }

    pub fn created_display(&self) -> String {
        crate::time_utils::display_datetime(&self.created_at)
    }
}

/// Field-masked patch that flips the read flag and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadReadPatch {
    pub read: bool,
}

impl LeadReadPatch {
    pub const FIELDS: [&'static str; 1] = ["read"];
}

/// Contact form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter your name"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter a message"))]
    pub message: String,
}

impl ContactForm {
    /// Trim whitespace from every field before validation.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Build the document to insert. The read flag always starts cleared.
    pub fn into_lead(self, user_id: Option<String>, created_at: DateTime<Utc>) -> Lead {
        Lead {
            id: None,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            user_id,
            read: false,
            created_at,
        }
    }
}

/// `https://wa.me/<digits>` for a phone number, or `None` without digits.
pub fn whatsapp_url(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{}", digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_into_lead_starts_unread() {
        let form = ContactForm {
            name: " Aisha ".into(),
            email: "aisha@example.com".into(),
            phone: "+91 98765 43210".into(),
            message: "Need a laptop".into(),
        }
        .normalized();

        let lead = form.into_lead(Some("uid-1".into()), created());

        assert!(!lead.read);
        assert_eq!(lead.name, "Aisha");
        assert_eq!(lead.user_id.as_deref(), Some("uid-1"));
        assert!(lead.id.is_none());
    }

    #[test]
    fn test_id_is_not_serialized() {
        let lead = Lead {
            id: Some("doc-1".into()),
            name: "A".into(),
            email: "a@example.com".into(),
            phone: "1".into(),
            message: "m".into(),
            user_id: None,
            read: false,
            created_at: created(),
        };
        let value = serde_json::to_value(&lead).unwrap();

        assert!(value.get("id").is_none());
        assert_eq!(value["read"], false);
        assert!(value.get("userId").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_read_patch_carries_only_read_flag() {
        let value = serde_json::to_value(LeadReadPatch { read: true }).unwrap();
        assert_eq!(value, serde_json::json!({ "read": true }));
        assert_eq!(LeadReadPatch::FIELDS, ["read"]);

        let back: LeadReadPatch = serde_json::from_value(value).unwrap();
        assert!(back.read);
    }

    #[test]
    fn test_validation_messages() {
        let form = ContactForm {
            name: String::new(),
            email: "not-an-email".into(),
            phone: "123".into(),
            message: "hello".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("message"));
    }

    #[test]
    fn test_whatsapp_url_strips_non_digits() {
        assert_eq!(
            whatsapp_url("+91 98765-43210").as_deref(),
            Some("https://wa.me/919876543210")
        );
        assert_eq!(whatsapp_url("n/a"), None);
    }
}
