// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! MITC site: marketing pages and admin console for Mateen IT Corp.
//!
//! Server-rendered pages backed by Firestore, with Firebase Authentication
//! for accounts and a role-gated `/dashboard` for staff.

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notice;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod views;

use config::Config;
use db::FirestoreDb;
use services::{IdentityClient, SettingsService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
    pub settings: SettingsService,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb, identity: IdentityClient) -> Self {
        Self {
            settings: SettingsService::new(db.clone()),
            config,
            db,
            identity,
        }
    }

    /// Offline state: test config, no database, no auth service.
    pub fn for_tests() -> Self {
        Self::new(
            Config::test_default(),
            FirestoreDb::new_mock(),
            IdentityClient::new_mock(),
        )
    }
}
