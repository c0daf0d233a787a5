// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Page-view records and the analytics derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Path fragments that are never tracked.
pub const UNTRACKED_PATH_FRAGMENTS: [&str; 6] = [
    "/dashboard",
    "/login",
    "/signup",
    "/auth/",
    "/health",
    "/static",
];

/// Visit stored in Firestore (`siteVisits/{auto-id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub path: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Visit {
    pub fn new(path: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            path: path.to_string(),
            timestamp,
        }
    }

    pub fn timestamp_display(&self) -> String {
        crate::time_utils::display_datetime(&self.timestamp)
    }
}

/// Whether a page view at `path` should be recorded.
pub fn should_track(path: &str) -> bool {
    !UNTRACKED_PATH_FRAGMENTS
        .iter()
        .any(|fragment| path.contains(fragment))
}

/// Summary numbers shown on the visits page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitStats {
    pub total: usize,
    pub unique_paths: usize,
    pub popular_path: String,
}

impl VisitStats {
    pub fn from_visits(visits: &[Visit]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for visit in visits {
            *counts.entry(visit.path.as_str()).or_default() += 1;
        }

        // Ties go to the lexicographically smallest path so the result is stable.
        let popular_path = counts
            .iter()
            .max_by(|(pa, ca), (pb, cb)| ca.cmp(cb).then_with(|| pb.cmp(pa)))
            .map(|(path, _)| path.to_string())
            .unwrap_or_else(|| "/".to_string());

        let unique_paths = visits
            .iter()
            .map(|v| v.path.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: visits.len(),
            unique_paths,
            popular_path,
        }
    }
}

/// Keep visits whose timestamp falls in `[from, to]` (inclusive).
pub fn filter_by_range(visits: &[Visit], from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Visit> {
    visits
        .iter()
        .filter(|v| v.timestamp >= from && v.timestamp <= to)
        .cloned()
        .collect()
}
