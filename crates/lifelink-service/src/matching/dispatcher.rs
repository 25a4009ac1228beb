//! Idempotent notification fan-out.

use std::sync::Arc;

use lifelink_database::store::NotificationStore;
use lifelink_entity::donor::Donor;
use lifelink_entity::notification::Notification;
use lifelink_entity::request::BloodRequest;

/// Persists one request-match notification per eligible donor.
///
/// Dispatch is best-effort fan-out, not all-or-nothing: a failed insert
/// for one donor is logged and does not abort the remaining donors.
/// Duplicate suppression is the store's job (`insert_if_absent`), so the
/// live path and reconciliation may both dispatch the same request.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    /// Notification store write capability.
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Persist a notification for each donor. Returns the number of
    /// notifications actually created; suppressed duplicates and failed
    /// inserts are not counted.
    pub async fn dispatch(&self, request: &BloodRequest, donors: &[Donor]) -> u64 {
        let mut created = 0u64;

        for donor in donors {
            let notification = Notification::request_match(request, donor.user_id);
            match self.notifications.insert_if_absent(&notification).await {
                Ok(true) => created += 1,
                Ok(false) => {
                    // Expected steady state under live/reconcile overlap.
                    tracing::debug!(
                        request_id = %request.id,
                        recipient = %donor.user_id,
                        "Request-match notification already exists"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %request.id,
                        recipient = %donor.user_id,
                        "Failed to persist notification, leaving for reconciliation: {e}"
                    );
                }
            }
        }

        if created > 0 {
            tracing::info!(
                request_id = %request.id,
                created,
                eligible = donors.len(),
                "Dispatched request-match notifications"
            );
        }

        created
    }
}
