//! Storage capability contracts.
//!
//! The matching engine, read model, and watcher consume these traits via
//! constructor injection rather than reaching for an ambient backend
//! client. The `repositories` module provides the PostgreSQL
//! implementations; `lifelink-test-utils` provides in-memory ones.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use lifelink_core::result::AppResult;
use lifelink_core::types::pagination::{PageRequest, PageResponse};
use lifelink_entity::donor::Donor;
use lifelink_entity::notification::Notification;
use lifelink_entity::request::BloodRequest;

/// Read/write access to the donor directory.
#[async_trait]
pub trait DonorDirectory: std::fmt::Debug + Send + Sync + 'static {
    /// All donors currently flagged available.
    async fn find_available(&self) -> AppResult<Vec<Donor>>;

    /// The donor profile owned by a user, if one exists.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Donor>>;

    /// Persist a new donor profile. Fails with a conflict if the user
    /// already has one.
    async fn create(&self, donor: &Donor) -> AppResult<Donor>;

    /// Flip a donor's availability flag.
    async fn set_availability(&self, user_id: Uuid, available: bool) -> AppResult<()>;

    /// Record a completed donation: sets the last-donation date and
    /// marks the donor unavailable.
    async fn record_donation(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()>;
}

/// Read/write access to blood requests.
#[async_trait]
pub trait RequestStore: std::fmt::Debug + Send + Sync + 'static {
    /// Fetch a request by id.
    async fn get(&self, id: Uuid) -> AppResult<Option<BloodRequest>>;

    /// All requests still open for matching (pending or active).
    async fn query_pending_or_active(&self) -> AppResult<Vec<BloodRequest>>;

    /// Persist a new request.
    async fn create(&self, request: &BloodRequest) -> AppResult<BloodRequest>;
}

/// Read/write access to persisted notifications.
#[async_trait]
pub trait NotificationStore: std::fmt::Debug + Send + Sync + 'static {
    /// Insert a notification unless one already exists for the same
    /// `(request_id, user_id)` pair. Returns whether a row was created.
    ///
    /// Uniqueness is enforced by the store so that independent callers
    /// (live delivery and reconciliation) may race safely.
    async fn insert_if_absent(&self, notification: &Notification) -> AppResult<bool>;

    /// List a user's notifications, newest first.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark one of a user's notifications as read. A missing or
    /// already-read notification is a no-op.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Mark all of a user's notifications as read. Returns the number of
    /// rows updated.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Delete notifications created before the cutoff. Returns the number
    /// of rows deleted.
    async fn cleanup_old(&self, before: DateTime<Utc>) -> AppResult<u64>;

    /// Keep only the newest `limit` notifications per user. Returns the
    /// number of rows deleted.
    async fn trim_per_user(&self, limit: i64) -> AppResult<u64>;
}
