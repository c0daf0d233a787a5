// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Site-wide settings singleton (`siteSettings/global`).
//!
//! Stored flat so that partial updates map onto a Firestore field mask.

use serde::{Deserialize, Serialize};

use super::lead::whatsapp_url;

/// Weekday names in display order, paired with their field prefix.
pub const WEEKDAYS: [(&str, &str); 7] = [
    ("Monday", "monday"),
    ("Tuesday", "tuesday"),
    ("Wednesday", "wednesday"),
    ("Thursday", "thursday"),
    ("Friday", "friday"),
    ("Saturday", "saturday"),
    ("Sunday", "sunday"),
];

/// Settings document. Fields missing from the stored document take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    // SEO
    pub site_title: String,
    pub meta_description: String,
    pub og_image_url: String,

    // Business / contact
    pub business_name: String,
    pub sales_person_name: String,
    pub sales_person_email: String,
    pub sales_person_phone: String,
    pub whatsapp_link: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub linkedin_url: String,

    // Seasons (MM-DD)
    pub summer_start: String,
    pub summer_end: String,
    pub winter_start: String,
    pub winter_end: String,

    // Weekday hours (HH:MM)
    pub monday_open: String,
    pub monday_close: String,
    pub tuesday_open: String,
    pub tuesday_close: String,
    pub wednesday_open: String,
    pub wednesday_close: String,
    pub thursday_open: String,
    pub thursday_close: String,
    pub friday_open: String,
    pub friday_close: String,
    pub saturday_open: String,
    pub saturday_close: String,
    pub sunday_open: String,
    pub sunday_close: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        let weekday = ("09:00", "18:00");
        let weekend = ("10:00", "16:00");
        Self {
            site_title: "MITC - Mateen IT Corp".to_string(),
            meta_description: "Kashmir's Tech Authority Since 2013".to_string(),
            og_image_url: String::new(),
            business_name: "MITC".to_string(),
            sales_person_name: "Team MITC".to_string(),
            sales_person_email: String::new(),
            sales_person_phone: String::new(),
            whatsapp_link: String::new(),
            instagram_url: String::new(),
            facebook_url: String::new(),
            twitter_url: String::new(),
            linkedin_url: String::new(),
            summer_start: "04-01".to_string(),
            summer_end: "09-30".to_string(),
            winter_start: "10-01".to_string(),
            winter_end: "03-31".to_string(),
            monday_open: weekday.0.to_string(),
            monday_close: weekday.1.to_string(),
            tuesday_open: weekday.0.to_string(),
            tuesday_close: weekday.1.to_string(),
            wednesday_open: weekday.0.to_string(),
            wednesday_close: weekday.1.to_string(),
            thursday_open: weekday.0.to_string(),
            thursday_close: weekday.1.to_string(),
            friday_open: weekday.0.to_string(),
            friday_close: weekday.1.to_string(),
            saturday_open: weekend.0.to_string(),
            saturday_close: weekend.1.to_string(),
            sunday_open: weekend.0.to_string(),
            sunday_close: weekend.1.to_string(),
        }
    }
}

/// One row of the opening-hours table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHours {
    pub day: &'static str,
    pub key: &'static str,
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn is_closed(&self) -> bool {
        self.open.is_empty() || self.close.is_empty()
    }
}

impl SiteSettings {
    pub fn hours(&self) -> Vec<DayHours> {
        let pairs = [
            (&self.monday_open, &self.monday_close),
            (&self.tuesday_open, &self.tuesday_close),
            (&self.wednesday_open, &self.wednesday_close),
            (&self.thursday_open, &self.thursday_close),
            (&self.friday_open, &self.friday_close),
            (&self.saturday_open, &self.saturday_close),
            (&self.sunday_open, &self.sunday_close),
        ];
        WEEKDAYS
            .iter()
            .zip(pairs)
            .map(|(&(day, key), (open, close))| DayHours {
                day,
                key,
                open: open.clone(),
                close: close.clone(),
            })
            .collect()
    }

    /// Configured WhatsApp link, falling back to `wa.me` from the phone.
    pub fn whatsapp_url(&self) -> Option<String> {
        if !self.whatsapp_link.is_empty() {
            return Some(self.whatsapp_link.clone());
        }
        whatsapp_url(&self.sales_person_phone)
    }

    pub fn has_phone(&self) -> bool {
        !self.sales_person_phone.trim().is_empty()
    }

    /// Return a copy with `update` merged over the current values.
    pub fn merged(&self, update: &SettingsUpdate) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(self)?;
        let overlay = serde_json::to_value(update)?;
        if let (Some(base), Some(overlay)) = (base.as_object_mut(), overlay.as_object()) {
            for (key, value) in overlay {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base)
    }
}

/// Partial settings update. Only `Some` fields are written.
///
/// Doubles as the admin settings form: each tab posts only its own inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_person_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_person_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summer_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summer_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winter_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winter_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday_close: Option<String>,
}

impl SettingsUpdate {
    /// Document field names this update touches (the Firestore field mask).
    pub fn field_paths(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_paths().is_empty()
    }

    /// Trim all supplied values.
    pub fn trimmed(self) -> Self {
        let value = match serde_json::to_value(&self) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| {
                    let v = match v {
                        serde_json::Value::String(s) => serde_json::Value::String(s.trim().to_string()),
                        other => other,
                    };
                    (k, v)
                })
                .collect::<serde_json::Map<_, _>>(),
            _ => return self,
        };
        serde_json::from_value(serde_json::Value::Object(value)).unwrap_or(self)
    }
}
