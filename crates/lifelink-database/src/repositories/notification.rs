//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_core::types::pagination::{PageRequest, PageResponse};
use lifelink_entity::notification::Notification;

use crate::store::NotificationStore;

use super::is_policy_recursion;

/// Repository for notification operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert_if_absent(&self, notification: &Notification) -> AppResult<bool> {
        // The partial unique index on (user_id, request_id) makes the
        // insert race-safe across the live and reconciliation paths.
        let result = sqlx::query(
            "INSERT INTO notifications (id, user_id, kind, title, message, request_id, metadata, is_read, read_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (user_id, request_id) WHERE request_id IS NOT NULL DO NOTHING",
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.request_id)
        .bind(&notification.metadata)
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    if is_policy_recursion(&e) {
                        tracing::debug!("Notification count hit policy recursion; left for retry");
                    }
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            if is_policy_recursion(&e) {
                tracing::debug!("Notification list hit policy recursion; left for retry");
            }
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn cleanup_old(&self, before: chrono::DateTime<chrono::Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup notifications", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn trim_per_user(&self, limit: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE id IN (\
                SELECT id FROM (\
                    SELECT id, ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY created_at DESC) as r_num \
                    FROM notifications\
                ) t WHERE t.r_num > $1\
             )",
        )
        .bind(limit)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trim notifications", e))?;

        Ok(result.rows_affected())
    }
}
