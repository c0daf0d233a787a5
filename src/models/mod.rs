// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Data models for the application.

pub mod lead;
pub mod review;
pub mod settings;
pub mod user;
pub mod visit;

pub use lead::{ContactForm, Lead};
pub use review::{Review, ReviewPatch};
pub use settings::{SettingsUpdate, SiteSettings};
pub use user::{CurrentUser, Role, User};
pub use visit::Visit;
