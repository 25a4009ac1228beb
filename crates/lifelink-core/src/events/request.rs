//! Blood-request lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::id::RequestId;

/// Wrapper for blood-request events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: RequestEventPayload,
}

/// Union of blood-request event types.
///
/// Payloads carry denormalized string labels rather than entity types so
/// that this crate stays free of internal dependencies; consumers parse
/// the labels fail-closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RequestEventPayload {
    /// A blood request was created.
    Created {
        /// The created request.
        request_id: RequestId,
        /// Requested blood type label (e.g. `"O+"`).
        blood_type: String,
        /// Urgency level label (e.g. `"urgent"`).
        urgency: String,
    },
    /// A blood request changed status.
    StatusChanged {
        /// The affected request.
        request_id: RequestId,
        /// New status label (e.g. `"completed"`).
        status: String,
    },
}

impl RequestEvent {
    /// Create a new event with a fresh ID and the current timestamp.
    pub fn new(payload: RequestEventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// The request this event concerns.
    pub fn request_id(&self) -> RequestId {
        match &self.payload {
            RequestEventPayload::Created { request_id, .. } => *request_id,
            RequestEventPayload::StatusChanged { request_id, .. } => *request_id,
        }
    }
}
