//! Blood request submission input.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::blood::BloodType;

use super::urgency::UrgencyLevel;

/// Validated input for submitting a blood request.
///
/// Every field and its default is explicit; the draft is validated
/// before anything reaches the matching engine or the database.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BloodRequestDraft {
    /// Name of the patient needing blood.
    #[validate(length(min = 2, max = 100, message = "Name must be at least 2 characters"))]
    pub patient_name: String,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Units needed. Defaults to 1; bounded to 1-10.
    #[validate(range(min = 1, max = 10, message = "Units must be between 1 and 10"))]
    #[serde(default = "default_units")]
    pub units: i32,
    /// Hospital or clinic name.
    #[validate(length(min = 2, max = 200, message = "Hospital name is required"))]
    pub hospital: String,
    /// Free-form location.
    #[validate(length(min = 2, max = 200, message = "Location is required"))]
    pub location: String,
    /// Date the blood is required by.
    pub required_date: NaiveDate,
    /// Contact person for the request.
    #[validate(length(min = 2, max = 100, message = "Contact name is required"))]
    pub contact_name: String,
    /// Contact person's phone number.
    #[validate(length(min = 10, max = 15, message = "Valid phone number is required"))]
    pub contact_phone: String,
    /// Urgency of the request. Defaults to normal.
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
}

fn default_units() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BloodRequestDraft {
        BloodRequestDraft {
            patient_name: "Jordan Smith".to_string(),
            blood_type: BloodType::OPositive,
            units: 2,
            hospital: "University Medical Center".to_string(),
            location: "Downtown".to_string(),
            required_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_name: "Alex Doe".to_string(),
            contact_phone: "0123456789".to_string(),
            urgency_level: UrgencyLevel::Urgent,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_units_out_of_range_rejected() {
        let mut d = draft();
        d.units = 0;
        assert!(d.validate().is_err());
        d.units = 11;
        assert!(d.validate().is_err());
        d.units = 10;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let d: BloodRequestDraft = serde_json::from_str(
            r#"{
                "patient_name": "Jordan Smith",
                "blood_type": "A-",
                "hospital": "University Medical Center",
                "location": "Downtown",
                "required_date": "2026-09-01",
                "contact_name": "Alex Doe",
                "contact_phone": "0123456789"
            }"#,
        )
        .unwrap();
        assert_eq!(d.units, 1);
        assert_eq!(d.urgency_level, UrgencyLevel::Normal);
    }
}
