//! Blood request entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::blood::BloodType;

use super::draft::BloodRequestDraft;
use super::status::RequestStatus;
use super::urgency::UrgencyLevel;

/// A need for blood, submitted on behalf of a patient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The user who submitted the request.
    pub requester_id: Uuid,
    /// Name of the patient needing blood.
    pub patient_name: String,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Units needed (1-10).
    pub units: i32,
    /// Hospital or clinic name.
    pub hospital: String,
    /// Free-form location.
    pub location: String,
    /// Date the blood is required by.
    pub required_date: NaiveDate,
    /// Contact person for the request.
    pub contact_name: String,
    /// Contact person's phone number.
    pub contact_phone: String,
    /// Urgency of the request.
    pub urgency_level: UrgencyLevel,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Build a new pending request for a requester from a validated draft.
    pub fn from_draft(requester_id: Uuid, draft: &BloodRequestDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id,
            patient_name: draft.patient_name.clone(),
            blood_type: draft.blood_type,
            units: draft.units,
            hospital: draft.hospital.clone(),
            location: draft.location.clone(),
            required_date: draft.required_date,
            contact_name: draft.contact_name.clone(),
            contact_phone: draft.contact_phone.clone(),
            urgency_level: draft.urgency_level,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Whether the request is still open for matching.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}
