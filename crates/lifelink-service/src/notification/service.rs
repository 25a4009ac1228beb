//! Per-user view over persisted notifications.

use std::sync::Arc;

use lifelink_core::result::AppResult;
use lifelink_core::types::id::NotificationId;
use lifelink_core::types::pagination::{PageRequest, PageResponse};
use lifelink_database::store::NotificationStore;
use lifelink_entity::notification::Notification;

use crate::context::RequestContext;

/// Read model over a user's notifications.
///
/// All operations are scoped to the context user's own rows; the store
/// queries filter on the recipient, so one user can never observe or
/// mutate another's notifications through this service.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists the current user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notifications.find_by_user(ctx.user_id, page).await
    }

    /// Gets the unread notification count for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notifications.count_unread(ctx.user_id).await
    }

    /// Marks one of the current user's notifications as read.
    ///
    /// A nonexistent or already-read notification is a no-op, not an
    /// error.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<()> {
        self.notifications
            .mark_read(notification_id.into_uuid(), ctx.user_id)
            .await
    }

    /// Marks all of the current user's notifications as read. Returns
    /// the number of notifications updated.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notifications.mark_all_read(ctx.user_id).await
    }
}
