//! Notification retention job tests.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use lifelink_core::config::worker::WorkerConfig;
use lifelink_database::store::NotificationStore;
use lifelink_entity::blood::BloodType;
use lifelink_entity::notification::Notification;
use lifelink_entity::request::{BloodRequest, BloodRequestDraft, UrgencyLevel};
use lifelink_test_utils::MemoryNotificationStore;
use lifelink_worker::jobs::NotificationRetentionJob;

fn notification(recipient: Uuid, age_days: i64) -> Notification {
    let request = BloodRequest::from_draft(
        Uuid::new_v4(),
        &BloodRequestDraft {
            patient_name: "Jordan Smith".to_string(),
            blood_type: BloodType::OPositive,
            units: 1,
            hospital: "University Medical Center".to_string(),
            location: "Downtown".to_string(),
            required_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_name: "Alex Doe".to_string(),
            contact_phone: "0123456789".to_string(),
            urgency_level: UrgencyLevel::Normal,
        },
    );
    let mut n = Notification::request_match(&request, recipient);
    n.created_at = Utc::now() - Duration::days(age_days);
    n
}

#[tokio::test]
async fn test_retention_expires_old_and_trims_excess() {
    let store = Arc::new(MemoryNotificationStore::new());
    let user = Uuid::new_v4();

    // One stale notification and four recent ones.
    for age in [45, 3, 2, 1, 0] {
        assert!(store
            .insert_if_absent(&notification(user, age))
            .await
            .unwrap());
    }

    let config = WorkerConfig {
        enabled: true,
        cleanup_after_days: 30,
        max_stored_per_user: 2,
    };
    let job = NotificationRetentionJob::new(store.clone(), &config);
    let report = job.run().await.unwrap();

    assert_eq!(report.expired, 1);
    assert_eq!(report.trimmed, 2);

    let remaining = store.all();
    assert_eq!(remaining.len(), 2);
    // The newest notifications survive.
    assert!(remaining
        .iter()
        .all(|n| n.created_at > Utc::now() - Duration::days(2)));
}

#[tokio::test]
async fn test_retention_is_a_noop_on_small_feeds() {
    let store = Arc::new(MemoryNotificationStore::new());
    let user = Uuid::new_v4();
    store
        .insert_if_absent(&notification(user, 1))
        .await
        .unwrap();

    let config = WorkerConfig::default();
    let job = NotificationRetentionJob::new(store.clone(), &config);
    let report = job.run().await.unwrap();

    assert_eq!(report.expired, 0);
    assert_eq!(report.trimmed, 0);
    assert_eq!(store.all().len(), 1);
}
