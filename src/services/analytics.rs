// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Admin dashboard aggregates and list filtering.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Role, User};
use crate::time_utils;
use chrono::Duration;

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub unread_leads: usize,
    pub visits_last_24h: usize,
    pub reviews_last_30d: usize,
    pub total_users: usize,
}

impl DashboardStats {
    /// Run the four counts concurrently. Any failure fails the whole load.
    pub async fn load(db: &FirestoreDb) -> Result<Self, AppError> {
        let day_ago = time_utils::ago(Duration::hours(24));
        let month_ago = time_utils::ago(Duration::days(30));

        let (unread_leads, visits_last_24h, reviews_last_30d, total_users) = tokio::try_join!(
            db.count_unread_leads(),
            db.count_visits_since(day_ago),
            db.count_reviews_since(month_ago),
            db.count_users(),
        )?;

        Ok(Self {
            unread_leads,
            visits_last_24h,
            reviews_last_30d,
            total_users,
        })
    }
}

/// Counts shown above the user table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub total: usize,
    pub admins: usize,
    pub with_phone: usize,
}

impl UserSummary {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
            with_phone: users.iter().filter(|u| u.has_phone()).count(),
        }
    }
}

/// Case-insensitive substring match on name or email. An empty term matches
/// everything.
pub fn matches_search(name: &str, email: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || name.to_lowercase().contains(&term)
        || email.to_lowercase().contains(&term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: Role, phone: &str) -> User {
        let mut u = User::new("uid", name, "x@example.com", "", time_utils::now());
        u.role = role;
        u.phone = phone.to_string();
        u
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Ayesha Bhat", "ayesha@example.com", ""));
        assert!(matches_search("Ayesha Bhat", "ayesha@example.com", "BHAT"));
        assert!(matches_search("Ayesha Bhat", "ayesha@example.com", "@example"));
        assert!(!matches_search("Ayesha Bhat", "ayesha@example.com", "imran"));
    }

    #[test]
    fn test_user_summary() {
        let users = vec![
            user("A", Role::Admin, "+91 99"),
            user("B", Role::User, ""),
            user("C", Role::User, "12345"),
        ];
        let summary = UserSummary::from_users(&users);
        assert_eq!(
            summary,
            UserSummary {
                total: 3,
                admins: 1,
                with_phone: 2
            }
        );
    }

    #[tokio::test]
    async fn test_stats_fail_when_offline() {
        let db = FirestoreDb::new_mock();
        assert!(DashboardStats::load(&db).await.is_err());
    }
}
