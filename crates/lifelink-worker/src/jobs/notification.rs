//! Notification retention job.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing;

use lifelink_core::config::worker::WorkerConfig;
use lifelink_core::result::AppResult;
use lifelink_database::store::NotificationStore;

/// Outcome of one retention run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionReport {
    /// Notifications deleted for age.
    pub expired: u64,
    /// Notifications deleted by the per-user cap.
    pub trimmed: u64,
}

/// Deletes aged-out notifications and trims each user's feed to the
/// configured maximum.
#[derive(Debug)]
pub struct NotificationRetentionJob {
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
    /// Max age in days before cleanup.
    cleanup_after_days: i64,
    /// Max stored notifications per user.
    max_stored_per_user: i64,
}

impl NotificationRetentionJob {
    /// Create a new retention job from configuration.
    pub fn new(notifications: Arc<dyn NotificationStore>, config: &WorkerConfig) -> Self {
        Self {
            notifications,
            cleanup_after_days: i64::from(config.cleanup_after_days),
            max_stored_per_user: config.max_stored_per_user as i64,
        }
    }

    /// Run one retention pass.
    pub async fn run(&self) -> AppResult<RetentionReport> {
        tracing::info!(
            cleanup_after_days = self.cleanup_after_days,
            max_stored_per_user = self.max_stored_per_user,
            "Running notification retention"
        );

        let cutoff = Utc::now() - Duration::days(self.cleanup_after_days);
        let expired = self.notifications.cleanup_old(cutoff).await?;
        let trimmed = self
            .notifications
            .trim_per_user(self.max_stored_per_user)
            .await?;

        tracing::info!(expired, trimmed, "Notification retention complete");
        Ok(RetentionReport { expired, trimmed })
    }
}
