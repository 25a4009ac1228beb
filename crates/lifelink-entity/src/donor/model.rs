//! Donor entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::blood::BloodType;

use super::registration::DonorRegistration;

/// A person willing to give blood.
///
/// One donor profile exists per owning user. Donors are never hard-deleted
/// in normal operation; `is_available` is the soft state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    /// Unique donor identifier.
    pub id: Uuid,
    /// The owning user account.
    pub user_id: Uuid,
    /// The donor's blood type.
    pub blood_type: BloodType,
    /// Whether the donor is currently available to donate.
    pub is_available: bool,
    /// Contact phone number.
    pub contact_number: String,
    /// Free-form location (city/campus area).
    pub location: String,
    /// Date of the most recent donation, if any.
    pub last_donation_date: Option<NaiveDate>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Donor {
    /// Build a fresh donor profile for a user from a validated registration.
    pub fn from_registration(user_id: Uuid, registration: &DonorRegistration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            blood_type: registration.blood_type,
            is_available: registration.is_available,
            contact_number: registration.contact_number.clone(),
            location: registration.location.clone(),
            last_donation_date: registration.last_donation_date,
            created_at: now,
            updated_at: now,
        }
    }
}
