//! Structured metadata carried by request-match notifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blood::BloodType;
use crate::request::BloodRequest;

/// Structured payload attached to a request-match notification.
///
/// Serialized as camelCase JSON into the notification's `metadata` column
/// so dashboard clients can render match details without a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMatchMeta {
    /// The request that triggered the match.
    pub request_id: Uuid,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Hospital named in the request.
    pub hospital: String,
    /// Whether the request is critical/urgent.
    pub urgent: bool,
    /// Patient the request is for.
    pub patient_name: String,
}

impl RequestMatchMeta {
    /// Build metadata from a blood request.
    pub fn from_request(request: &BloodRequest) -> Self {
        Self {
            request_id: request.id,
            blood_type: request.blood_type,
            hospital: request.hospital.clone(),
            urgent: request.urgency_level.is_urgent(),
            patient_name: request.patient_name.clone(),
        }
    }

    /// Serialize as a JSON value for the `metadata` column.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "requestId": self.request_id,
            "bloodType": self.blood_type,
            "hospital": self.hospital,
            "urgent": self.urgent,
            "patientName": self.patient_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_keys() {
        let meta = RequestMatchMeta {
            request_id: Uuid::new_v4(),
            blood_type: BloodType::OPositive,
            hospital: "University Medical Center".to_string(),
            urgent: true,
            patient_name: "Jordan Smith".to_string(),
        };
        let value = meta.to_value();
        assert_eq!(value["bloodType"], "O+");
        assert_eq!(value["urgent"], true);
        assert_eq!(value["patientName"], "Jordan Smith");

        let parsed: RequestMatchMeta = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, meta);
    }
}
