// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Site settings service.
//!
//! Reads the `siteSettings/global` singleton, falling back to the built-in
//! defaults when it is missing or unreadable, and keeps a short-lived
//! in-process snapshot. Updates are write-through: the remote document is
//! patched first, then the patch is merged into the snapshot without
//! re-fetching.

use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{SettingsUpdate, SiteSettings};

const SNAPSHOT_TTL: Duration = Duration::from_secs(60);

/// Result of [`SettingsService::load`].
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: SiteSettings,
    /// Set when the read failed and defaults were substituted
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    settings: SiteSettings,
    expires_at: Instant,
}

/// Settings read/update service.
pub struct SettingsService {
    db: FirestoreDb,
    snapshot: RwLock<Option<Snapshot>>,
}

impl SettingsService {
    pub fn new(db: FirestoreDb) -> Self {
        Self {
            db,
            snapshot: RwLock::new(None),
        }
    }

    /// Current settings.
    ///
    /// Never fails: a missing document yields the defaults, and so does a
    /// failed read (with the error recorded on the result). Failed reads are
    /// not cached, so the next call tries again.
    pub async fn load(&self) -> LoadedSettings {
        if let Some(snapshot) = self.live_snapshot().await {
            return LoadedSettings {
                settings: snapshot.settings,
                error: None,
            };
        }

        match self.db.get_settings().await {
            Ok(found) => {
                if found.is_none() {
                    tracing::debug!("Settings document absent, using defaults");
                }
                let settings = found.unwrap_or_default();
                self.store(settings.clone()).await;
                LoadedSettings {
                    settings,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching settings");
                LoadedSettings {
                    settings: SiteSettings::default(),
                    error: Some("Failed to load settings".to_string()),
                }
            }
        }
    }

    /// Write `update` to the remote document, then merge it into the local
    /// snapshot.
    ///
    /// If the remote write fails the snapshot is left as it was. The merge
    /// base is the last snapshot (even if stale) or the defaults.
    pub async fn update(&self, update: &SettingsUpdate) -> Result<SiteSettings, AppError> {
        self.db.update_settings(update).await?;

        let mut guard = self.snapshot.write().await;
        let base = guard
            .as_ref()
            .map(|s| s.settings.clone())
            .unwrap_or_default();
        let merged = base
            .merged(update)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Settings merge failed: {}", e)))?;

        *guard = Some(Snapshot {
            settings: merged.clone(),
            expires_at: Instant::now() + SNAPSHOT_TTL,
        });

        tracing::info!(fields = ?update.field_paths(), "Settings updated");
        Ok(merged)
    }

    async fn live_snapshot(&self) -> Option<Snapshot> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| s.expires_at > Instant::now())
            .cloned()
    }

    async fn store(&self, settings: SiteSettings) {
        *self.snapshot.write().await = Some(Snapshot {
            settings,
            expires_at: Instant::now() + SNAPSHOT_TTL,
        });
    }
}
