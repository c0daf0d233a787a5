// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Shared helpers for date/time handling.
//!
//! Stored documents carry native Firestore timestamps; older documents that
//! hold RFC 3339 strings still read into the same `DateTime<Utc>` fields.

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};

/// Current time at millisecond precision, which survives a storage round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `now - ago`.
pub fn ago(ago: Duration) -> DateTime<Utc> {
    now() - ago
}

/// Parse a `YYYY-MM-DD` form value into the first instant of that day (UTC).
pub fn start_of_day(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse a `YYYY-MM-DD` form value into the last millisecond of that day (UTC).
pub fn end_of_day(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_milli_opt(23, 59, 59, 999)?.and_utc())
}

/// Human-readable rendering for templates (`2024-01-15 10:00 UTC`).
pub fn display_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Date-only rendering for templates (`2024-01-15`).
pub fn display_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}
