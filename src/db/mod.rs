//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const LEADS: &str = "leads";
    pub const REVIEWS: &str = "reviews";
    pub const SITE_VISITS: &str = "siteVisits";
    /// Holds the single `global` settings document
    pub const SITE_SETTINGS: &str = "siteSettings";
    pub const SETTINGS_DOC_ID: &str = "global";
}
