//! In-memory notification store.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_core::types::pagination::{PageRequest, PageResponse};
use lifelink_database::store::NotificationStore;
use lifelink_entity::notification::Notification;

/// In-memory implementation of [`NotificationStore`].
///
/// Mirrors the SQL schema's partial unique index: at most one row per
/// `(request_id, user_id)` pair when `request_id` is present. Inserts
/// for recipients registered via [`fail_inserts_for`] return a database
/// error, for exercising partial-failure paths.
///
/// [`fail_inserts_for`]: MemoryNotificationStore::fail_inserts_for
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    rows: Mutex<Vec<Notification>>,
    failing_recipients: Mutex<HashSet<Uuid>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert for the given recipient fail with a database
    /// error until [`clear_failures`](Self::clear_failures) is called.
    pub fn fail_inserts_for(&self, user_id: Uuid) {
        self.failing_recipients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user_id);
    }

    /// Stop injecting insert failures.
    pub fn clear_failures(&self) {
        self.failing_recipients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Snapshot of every stored notification.
    pub fn all(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert_if_absent(&self, notification: &Notification) -> AppResult<bool> {
        if self
            .failing_recipients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&notification.user_id)
        {
            return Err(AppError::database("Injected insert failure"));
        }

        let mut rows = self.lock();
        if let Some(request_id) = notification.request_id {
            let exists = rows.iter().any(|n| {
                n.user_id == notification.user_id && n.request_id == Some(request_id)
            });
            if exists {
                return Ok(false);
            }
        }
        rows.push(notification.clone());
        Ok(true)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let mut mine: Vec<Notification> = self
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = mine.len() as u64;
        let items: Vec<Notification> = mine
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut rows = self.lock();
        if let Some(n) = rows
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            n.read_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut rows = self.lock();
        let mut updated = 0u64;
        for n in rows.iter_mut().filter(|n| n.user_id == user_id && !n.is_read) {
            n.is_read = true;
            n.read_at = Some(Utc::now());
            updated += 1;
        }
        Ok(updated)
    }

    async fn cleanup_old(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let mut rows = self.lock();
        let total = rows.len();
        rows.retain(|n| n.created_at >= before);
        Ok((total - rows.len()) as u64)
    }

    async fn trim_per_user(&self, limit: i64) -> AppResult<u64> {
        let mut rows = self.lock();
        let mut by_user: std::collections::HashMap<Uuid, Vec<(DateTime<Utc>, Uuid)>> =
            std::collections::HashMap::new();
        for n in rows.iter() {
            by_user.entry(n.user_id).or_default().push((n.created_at, n.id));
        }

        let mut drop_ids: HashSet<Uuid> = HashSet::new();
        for entries in by_user.values_mut() {
            entries.sort_by(|a, b| b.0.cmp(&a.0));
            for (_, id) in entries.iter().skip(limit as usize) {
                drop_ids.insert(*id);
            }
        }

        let total = rows.len();
        rows.retain(|n| !drop_ids.contains(&n.id));
        Ok((total - rows.len()) as u64)
    }
}
