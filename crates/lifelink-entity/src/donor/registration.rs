//! Donor registration input.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::blood::BloodType;

/// Validated input for registering as a donor.
///
/// Every field and its default is explicit; the struct is validated
/// before anything reaches the matching engine or the database.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DonorRegistration {
    /// The donor's blood type.
    pub blood_type: BloodType,
    /// Contact phone number.
    #[validate(length(min = 10, max = 15, message = "Valid phone number is required"))]
    pub contact_number: String,
    /// Free-form location.
    #[validate(length(min = 2, max = 100, message = "Location is required"))]
    pub location: String,
    /// Date of the most recent donation, if any.
    #[serde(default)]
    pub last_donation_date: Option<NaiveDate>,
    /// Initial availability. Defaults to available.
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}
