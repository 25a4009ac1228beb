//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use lifelink_core::error::AppError;

use crate::jobs::NotificationRetentionJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Notification retention job
    retention: Arc<NotificationRetentionJob>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(retention: Arc<NotificationRetentionJob>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            retention,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_notification_retention().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Notification retention — daily at 2 AM
    async fn register_notification_retention(&self) -> Result<(), AppError> {
        let retention = Arc::clone(&self.retention);
        let job = CronJob::new_async("0 0 2 * * *", move |_uuid, _lock| {
            let retention = Arc::clone(&retention);
            Box::pin(async move {
                tracing::debug!("Running scheduled notification retention");
                if let Err(e) = retention.run().await {
                    tracing::error!("Notification retention failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create notification_retention schedule: {}",
                e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to add notification_retention schedule: {}",
                e
            ))
        })?;

        tracing::info!("Registered: notification_retention (daily at 2AM)");
        Ok(())
    }
}
