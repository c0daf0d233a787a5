// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Middleware modules (session, role gate, visit tracking, security).

pub mod auth;
pub mod security;
pub mod visits;

pub use auth::{load_session, require_admin, RequireUser, Session};
pub use visits::track_visits;
