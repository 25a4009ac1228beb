//! Request watcher integration tests over the in-memory feed and stores.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use lifelink_core::config::watcher::WatcherConfig;
use lifelink_core::events::{RequestEvent, RequestEventPayload};
use lifelink_core::traits::ChangeFeed;
use lifelink_core::types::id::RequestId;
use lifelink_database::store::NotificationStore;
use lifelink_entity::blood::BloodType;
use lifelink_entity::donor::{Donor, DonorRegistration};
use lifelink_entity::request::{BloodRequest, BloodRequestDraft, UrgencyLevel};
use lifelink_realtime::MemoryChangeFeed;
use lifelink_service::{EligibleDonorResolver, MatchingEngine, NotificationDispatcher};
use lifelink_test_utils::{MemoryDonorDirectory, MemoryNotificationStore, MemoryRequestStore};
use lifelink_worker::{RequestWatcher, WatcherStatus};

fn donor(blood_type: BloodType) -> Donor {
    Donor::from_registration(
        Uuid::new_v4(),
        &DonorRegistration {
            blood_type,
            contact_number: "0123456789".to_string(),
            location: "North Campus".to_string(),
            last_donation_date: None,
            is_available: true,
        },
    )
}

fn request(blood_type: BloodType, urgency: UrgencyLevel) -> BloodRequest {
    BloodRequest::from_draft(
        Uuid::new_v4(),
        &BloodRequestDraft {
            patient_name: "Jordan Smith".to_string(),
            blood_type,
            units: 1,
            hospital: "University Medical Center".to_string(),
            location: "Downtown".to_string(),
            required_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_name: "Alex Doe".to_string(),
            contact_phone: "0123456789".to_string(),
            urgency_level: urgency,
        },
    )
}

fn created_event(request: &BloodRequest) -> RequestEvent {
    RequestEvent::new(RequestEventPayload::Created {
        request_id: RequestId::from(request.id),
        blood_type: request.blood_type.to_string(),
        urgency: request.urgency_level.to_string(),
    })
}

struct Harness {
    directory: Arc<MemoryDonorDirectory>,
    requests: Arc<MemoryRequestStore>,
    notifications: Arc<MemoryNotificationStore>,
    feed: Arc<MemoryChangeFeed>,
}

impl Harness {
    fn new() -> Self {
        Self {
            directory: Arc::new(MemoryDonorDirectory::new()),
            requests: Arc::new(MemoryRequestStore::new()),
            notifications: Arc::new(MemoryNotificationStore::new()),
            feed: Arc::new(MemoryChangeFeed::new(16)),
        }
    }

    fn watcher(&self, reconcile_interval_seconds: u64) -> RequestWatcher {
        let resolver = EligibleDonorResolver::new(self.directory.clone());
        let dispatcher = NotificationDispatcher::new(self.notifications.clone());
        let engine = Arc::new(MatchingEngine::new(
            resolver,
            dispatcher,
            self.requests.clone(),
        ));
        RequestWatcher::new(
            self.feed.clone(),
            engine,
            self.requests.clone(),
            WatcherConfig {
                enabled: true,
                reconcile_interval_seconds,
            },
        )
    }

    /// Wait until the store holds `expected` notifications, or panic.
    async fn await_notifications(&self, expected: usize) {
        for _ in 0..200 {
            if self.notifications.all().len() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {expected} notifications, found {}",
            self.notifications.all().len()
        );
    }
}

#[tokio::test]
async fn test_end_to_end_creation_event_delivery() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d.clone());

    // Long interval: only the startup scan runs; delivery must come
    // from the live subscription.
    let handle = h.watcher(3600).start().await.unwrap();

    let req = request(BloodType::OPositive, UrgencyLevel::Urgent);
    h.requests.insert(req.clone());
    h.feed.publish(created_event(&req)).await.unwrap();

    h.await_notifications(1).await;
    let all = h.notifications.all();
    assert_eq!(all[0].user_id, d.user_id);
    assert!(all[0].title.contains("URGENT"));
    assert_eq!(all[0].metadata.as_ref().unwrap()["bloodType"], "O+");
    assert_eq!(h.notifications.count_unread(d.user_id).await.unwrap(), 1);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_startup_reconciliation_covers_missed_events() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d.clone());

    // The request exists before the watcher starts; no event is ever
    // published for it.
    let req = request(BloodType::APositive, UrgencyLevel::Normal);
    h.requests.insert(req);

    let handle = h.watcher(3600).start().await.unwrap();

    h.await_notifications(1).await;
    assert_eq!(h.notifications.all()[0].user_id, d.user_id);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_events_create_one_notification() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d);

    let handle = h.watcher(3600).start().await.unwrap();

    let req = request(BloodType::BPositive, UrgencyLevel::Normal);
    h.requests.insert(req.clone());
    h.feed.publish(created_event(&req)).await.unwrap();
    h.feed.publish(created_event(&req)).await.unwrap();

    h.await_notifications(1).await;
    // Give the second delivery a chance to (wrongly) add another row.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.notifications.all().len(), 1);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_live_and_reconcile_overlap_stays_deduplicated() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d.clone());

    // Aggressive reconciliation while live events arrive for the same
    // request.
    let handle = h.watcher(1).start().await.unwrap();

    let req = request(BloodType::AbPositive, UrgencyLevel::Critical);
    h.requests.insert(req.clone());
    h.feed.publish(created_event(&req)).await.unwrap();

    h.await_notifications(1).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(h.notifications.all().len(), 1);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_malformed_event_is_skipped_without_stopping_the_watcher() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d);

    let handle = h.watcher(3600).start().await.unwrap();

    // Malformed blood type label: skipped with a warning.
    h.feed
        .publish(RequestEvent::new(RequestEventPayload::Created {
            request_id: RequestId::new(),
            blood_type: "X+".to_string(),
            urgency: "urgent".to_string(),
        }))
        .await
        .unwrap();

    // Event for a request that does not exist: also skipped.
    let phantom = request(BloodType::OPositive, UrgencyLevel::Normal);
    h.feed.publish(created_event(&phantom)).await.unwrap();

    // A healthy event afterwards still gets delivered.
    let req = request(BloodType::OPositive, UrgencyLevel::Normal);
    h.requests.insert(req.clone());
    h.feed.publish(created_event(&req)).await.unwrap();

    h.await_notifications(1).await;
    assert_eq!(h.notifications.all()[0].request_id, Some(req.id));

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_status_changed_events_are_ignored() {
    let h = Harness::new();
    h.directory.insert(donor(BloodType::ONegative));

    let handle = h.watcher(3600).start().await.unwrap();

    let req = request(BloodType::OPositive, UrgencyLevel::Normal);
    h.requests.insert(req.clone());
    h.feed
        .publish(RequestEvent::new(RequestEventPayload::StatusChanged {
            request_id: RequestId::from(req.id),
            status: "completed".to_string(),
        }))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.notifications.all().is_empty());

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_publishes_closed_status() {
    let h = Harness::new();
    let handle = h.watcher(3600).start().await.unwrap();
    assert_eq!(handle.status(), WatcherStatus::Subscribed);

    let status = handle.status_stream();
    handle.stop().await.unwrap();
    assert_eq!(*status.borrow(), WatcherStatus::Closed);
}

#[tokio::test]
async fn test_unread_count_rises_by_exactly_one() {
    let h = Harness::new();
    let d = donor(BloodType::ONegative);
    h.directory.insert(d.clone());

    let handle = h.watcher(1).start().await.unwrap();

    let req = request(BloodType::OPositive, UrgencyLevel::Urgent);
    h.requests.insert(req.clone());
    h.feed.publish(created_event(&req)).await.unwrap();

    h.await_notifications(1).await;
    // Multiple reconciliation passes later the count is still one.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(h.notifications.count_unread(d.user_id).await.unwrap(), 1);

    handle.stop().await.unwrap();
}
