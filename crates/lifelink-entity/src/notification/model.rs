//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::request::BloodRequest;

use super::kind::NotificationKind;
use super::meta::RequestMatchMeta;

/// A notification delivered to one user about one request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Back-reference to the triggering request. Lookup only, not a
    /// lifecycle dependency; also the dedupe key together with `user_id`.
    pub request_id: Option<Uuid>,
    /// Additional structured data (JSON).
    pub metadata: Option<serde_json::Value>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a request-match notification for one recipient.
    ///
    /// Critical and urgent requests get an `URGENT: ` title prefix and a
    /// raised metadata flag so clients can escalate presentation.
    pub fn request_match(request: &BloodRequest, recipient_id: Uuid) -> Self {
        let meta = RequestMatchMeta::from_request(request);
        let prefix = if meta.urgent { "URGENT: " } else { "" };
        Self {
            id: Uuid::new_v4(),
            user_id: recipient_id,
            kind: NotificationKind::RequestMatch,
            title: format!("{prefix}Blood Request Match"),
            message: format!(
                "Your blood type matches a request for {} at {}.",
                request.blood_type, request.hospital
            ),
            request_id: Some(request.id),
            metadata: Some(meta.to_value()),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::blood::BloodType;
    use crate::request::{BloodRequestDraft, UrgencyLevel};

    fn request(urgency: UrgencyLevel) -> BloodRequest {
        let draft = BloodRequestDraft {
            patient_name: "Jordan Smith".to_string(),
            blood_type: BloodType::OPositive,
            units: 2,
            hospital: "University Medical Center".to_string(),
            location: "Downtown".to_string(),
            required_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_name: "Alex Doe".to_string(),
            contact_phone: "0123456789".to_string(),
            urgency_level: urgency,
        };
        BloodRequest::from_draft(Uuid::new_v4(), &draft)
    }

    #[test]
    fn test_urgent_title_prefix() {
        let recipient = Uuid::new_v4();
        let urgent = Notification::request_match(&request(UrgencyLevel::Critical), recipient);
        assert!(urgent.title.starts_with("URGENT: "));
        assert_eq!(urgent.metadata.as_ref().unwrap()["urgent"], true);

        let normal = Notification::request_match(&request(UrgencyLevel::Scheduled), recipient);
        assert_eq!(normal.title, "Blood Request Match");
        assert_eq!(normal.metadata.as_ref().unwrap()["urgent"], false);
    }

    #[test]
    fn test_message_names_type_and_hospital() {
        let notif = Notification::request_match(&request(UrgencyLevel::Normal), Uuid::new_v4());
        assert_eq!(
            notif.message,
            "Your blood type matches a request for O+ at University Medical Center."
        );
        assert!(notif.is_unread());
    }
}
