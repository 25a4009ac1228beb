//! Blood request submission.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use lifelink_core::error::AppError;
use lifelink_core::events::{RequestEvent, RequestEventPayload};
use lifelink_core::result::AppResult;
use lifelink_core::traits::ChangeFeed;
use lifelink_core::types::id::RequestId;
use lifelink_database::store::RequestStore;
use lifelink_entity::request::{BloodRequest, BloodRequestDraft};

use crate::context::RequestContext;

/// Handles blood request submission and creation-event publication.
#[derive(Debug, Clone)]
pub struct RequestService {
    /// Request store.
    requests: Arc<dyn RequestStore>,
    /// Change feed for creation events.
    feed: Arc<dyn ChangeFeed>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(requests: Arc<dyn RequestStore>, feed: Arc<dyn ChangeFeed>) -> Self {
        Self { requests, feed }
    }

    /// Submits a blood request on behalf of the current user.
    ///
    /// The draft is validated, persisted as a pending request, and a
    /// creation event is published for live delivery. Publication
    /// failure is logged but does not fail the submission; the
    /// reconciliation scan covers missed events.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        draft: &BloodRequestDraft,
    ) -> AppResult<BloodRequest> {
        draft
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid blood request: {e}")))?;

        let request = BloodRequest::from_draft(ctx.user_id, draft);
        let created = self.requests.create(&request).await?;

        let event = RequestEvent::new(RequestEventPayload::Created {
            request_id: RequestId::from(created.id),
            blood_type: created.blood_type.to_string(),
            urgency: created.urgency_level.to_string(),
        });
        if let Err(e) = self.feed.publish(event).await {
            tracing::warn!(request_id = %created.id, "Failed to publish creation event: {e}");
        }

        info!(
            request_id = %created.id,
            blood_type = %created.blood_type,
            urgency = %created.urgency_level,
            "Blood request submitted"
        );
        Ok(created)
    }

    /// Fetches a request by id.
    pub async fn get(&self, request_id: RequestId) -> AppResult<BloodRequest> {
        self.requests
            .get(request_id.into_uuid())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blood request {request_id} not found")))
    }
}
