//! The donor-notification matching engine.
//!
//! Resolution and dispatch are separate components so the surrounding
//! application can invoke either directly; [`MatchingEngine`] composes
//! them for the watcher and for admin-triggered fan-out.

pub mod dispatcher;
pub mod resolver;

use std::sync::Arc;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_core::types::id::RequestId;
use lifelink_database::store::RequestStore;
use lifelink_entity::request::BloodRequest;

pub use dispatcher::NotificationDispatcher;
pub use resolver::EligibleDonorResolver;

/// Resolves eligible donors for a request and fans notifications out to
/// them.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    /// Eligible donor resolution.
    resolver: EligibleDonorResolver,
    /// Idempotent notification fan-out.
    dispatcher: NotificationDispatcher,
    /// Request store, for by-id fan-out.
    requests: Arc<dyn RequestStore>,
}

impl MatchingEngine {
    /// Creates a new matching engine.
    pub fn new(
        resolver: EligibleDonorResolver,
        dispatcher: NotificationDispatcher,
        requests: Arc<dyn RequestStore>,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            requests,
        }
    }

    /// Resolve and notify all eligible donors for a request.
    ///
    /// Requests no longer open for matching are skipped. Returns the
    /// number of notifications created; duplicates suppressed by the
    /// store are not counted.
    pub async fn notify_request(&self, request: &BloodRequest) -> AppResult<u64> {
        if !request.is_open() {
            tracing::debug!(
                request_id = %request.id,
                status = %request.status,
                "Skipping closed request"
            );
            return Ok(0);
        }

        let donors = self.resolver.resolve(request).await?;
        if donors.is_empty() {
            tracing::debug!(request_id = %request.id, "No eligible donors for request");
            return Ok(0);
        }

        Ok(self.dispatcher.dispatch(request, &donors).await)
    }

    /// Resolve and notify eligible donors for a request by id.
    ///
    /// This is the admin-triggered "notify all eligible donors for this
    /// request" path; the watcher uses it for feed events as well.
    pub async fn notify_eligible(&self, request_id: RequestId) -> AppResult<u64> {
        let request = self
            .requests
            .get(request_id.into_uuid())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blood request {request_id} not found")))?;

        self.notify_request(&request).await
    }
}
