// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Services module - business logic layer.

pub mod analytics;
pub mod identity;
pub mod settings;

pub use analytics::{DashboardStats, UserSummary};
pub use identity::{AuthAccount, IdentityClient, IdentityError};
pub use settings::{LoadedSettings, SettingsService};
