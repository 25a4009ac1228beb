//! Matching engine integration tests over in-memory stores.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use lifelink_core::error::ErrorKind;
use lifelink_core::types::id::RequestId;
use lifelink_entity::blood::BloodType;
use lifelink_entity::donor::{Donor, DonorRegistration};
use lifelink_entity::request::{BloodRequest, BloodRequestDraft, RequestStatus, UrgencyLevel};
use lifelink_service::{EligibleDonorResolver, MatchingEngine, NotificationDispatcher};
use lifelink_test_utils::{MemoryDonorDirectory, MemoryNotificationStore, MemoryRequestStore};

fn donor(blood_type: BloodType, available: bool) -> Donor {
    Donor::from_registration(
        Uuid::new_v4(),
        &DonorRegistration {
            blood_type,
            contact_number: "0123456789".to_string(),
            location: "North Campus".to_string(),
            last_donation_date: None,
            is_available: available,
        },
    )
}

fn request(blood_type: BloodType, urgency: UrgencyLevel) -> BloodRequest {
    BloodRequest::from_draft(
        Uuid::new_v4(),
        &BloodRequestDraft {
            patient_name: "Jordan Smith".to_string(),
            blood_type,
            units: 2,
            hospital: "University Medical Center".to_string(),
            location: "Downtown".to_string(),
            required_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_name: "Alex Doe".to_string(),
            contact_phone: "0123456789".to_string(),
            urgency_level: urgency,
        },
    )
}

struct Harness {
    directory: Arc<MemoryDonorDirectory>,
    requests: Arc<MemoryRequestStore>,
    notifications: Arc<MemoryNotificationStore>,
    engine: MatchingEngine,
}

fn harness() -> Harness {
    let directory = Arc::new(MemoryDonorDirectory::new());
    let requests = Arc::new(MemoryRequestStore::new());
    let notifications = Arc::new(MemoryNotificationStore::new());

    let resolver = EligibleDonorResolver::new(directory.clone());
    let dispatcher = NotificationDispatcher::new(notifications.clone());
    let engine = MatchingEngine::new(resolver, dispatcher, requests.clone());

    Harness {
        directory,
        requests,
        notifications,
        engine,
    }
}

#[tokio::test]
async fn test_resolver_excludes_unavailable_donors() {
    let h = harness();
    let available = donor(BloodType::ONegative, true);
    let unavailable = donor(BloodType::ONegative, false);
    h.directory.insert(available.clone());
    h.directory.insert(unavailable);

    let resolver = EligibleDonorResolver::new(h.directory.clone());
    let resolved = resolver
        .resolve(&request(BloodType::APositive, UrgencyLevel::Normal))
        .await
        .unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, available.id);
}

#[tokio::test]
async fn test_resolver_filters_incompatible_types() {
    let h = harness();
    h.directory.insert(donor(BloodType::APositive, true));
    h.directory.insert(donor(BloodType::ONegative, true));
    h.directory.insert(donor(BloodType::AbPositive, true));

    let resolver = EligibleDonorResolver::new(h.directory.clone());

    // Only O- can give to an O- recipient.
    let resolved = resolver
        .resolve(&request(BloodType::ONegative, UrgencyLevel::Normal))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].blood_type, BloodType::ONegative);

    // Everyone can give to AB+.
    let resolved = resolver
        .resolve(&request(BloodType::AbPositive, UrgencyLevel::Normal))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 3);
}

#[tokio::test]
async fn test_resolver_empty_result_is_not_an_error() {
    let h = harness();
    let resolver = EligibleDonorResolver::new(h.directory.clone());
    let resolved = resolver
        .resolve(&request(BloodType::ONegative, UrgencyLevel::Critical))
        .await
        .unwrap();
    assert!(resolved.is_empty());
}

#[tokio::test]
async fn test_dispatch_is_idempotent() {
    let h = harness();
    let donors = vec![
        donor(BloodType::ONegative, true),
        donor(BloodType::OPositive, true),
    ];
    let req = request(BloodType::APositive, UrgencyLevel::Normal);
    let dispatcher = NotificationDispatcher::new(h.notifications.clone());

    let first = dispatcher.dispatch(&req, &donors).await;
    let second = dispatcher.dispatch(&req, &donors).await;

    assert_eq!(first, 2);
    assert_eq!(second, 0);
    assert_eq!(h.notifications.all().len(), 2);
}

#[tokio::test]
async fn test_urgent_requests_flag_notifications() {
    let h = harness();
    let recipient = donor(BloodType::ONegative, true);
    let dispatcher = NotificationDispatcher::new(h.notifications.clone());

    dispatcher
        .dispatch(
            &request(BloodType::BPositive, UrgencyLevel::Critical),
            std::slice::from_ref(&recipient),
        )
        .await;
    dispatcher
        .dispatch(
            &request(BloodType::BPositive, UrgencyLevel::Scheduled),
            std::slice::from_ref(&recipient),
        )
        .await;

    let all = h.notifications.all();
    assert_eq!(all.len(), 2);

    let urgent = all.iter().find(|n| n.title.starts_with("URGENT: ")).unwrap();
    assert_eq!(urgent.metadata.as_ref().unwrap()["urgent"], true);

    let normal = all.iter().find(|n| n.title == "Blood Request Match").unwrap();
    assert_eq!(normal.metadata.as_ref().unwrap()["urgent"], false);
    assert_eq!(normal.metadata.as_ref().unwrap()["bloodType"], "B+");
}

#[tokio::test]
async fn test_partial_failure_does_not_abort_fan_out() {
    let h = harness();
    let healthy = donor(BloodType::ONegative, true);
    let failing = donor(BloodType::ONegative, true);
    h.notifications.fail_inserts_for(failing.user_id);

    let req = request(BloodType::APositive, UrgencyLevel::Normal);
    let dispatcher = NotificationDispatcher::new(h.notifications.clone());

    let created = dispatcher
        .dispatch(&req, &[failing.clone(), healthy.clone()])
        .await;
    assert_eq!(created, 1);
    assert_eq!(h.notifications.all()[0].user_id, healthy.user_id);

    // The failed donor is picked up once the store recovers, without
    // duplicating the healthy donor's notification.
    h.notifications.clear_failures();
    let retried = dispatcher.dispatch(&req, &[failing, healthy]).await;
    assert_eq!(retried, 1);
    assert_eq!(h.notifications.all().len(), 2);
}

#[tokio::test]
async fn test_interleaved_dispatch_keeps_one_notification_per_donor() {
    let h = harness();
    let donors = vec![
        donor(BloodType::ONegative, true),
        donor(BloodType::ANegative, true),
    ];
    for d in &donors {
        h.directory.insert(d.clone());
    }
    let req = request(BloodType::AbPositive, UrgencyLevel::Urgent);
    h.requests.insert(req.clone());

    // The live path and the reconciliation path race on the same
    // request; storage uniqueness must hold regardless of interleaving.
    let (live, reconcile) = tokio::join!(
        h.engine.notify_request(&req),
        h.engine.notify_request(&req)
    );

    assert_eq!(live.unwrap() + reconcile.unwrap(), 2);
    let all = h.notifications.all();
    assert_eq!(all.len(), 2);
    for d in &donors {
        assert_eq!(all.iter().filter(|n| n.user_id == d.user_id).count(), 1);
    }
}

#[tokio::test]
async fn test_notify_eligible_unknown_request() {
    let h = harness();
    let err = h.engine.notify_eligible(RequestId::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_closed_requests_are_skipped() {
    let h = harness();
    h.directory.insert(donor(BloodType::ONegative, true));

    let mut req = request(BloodType::APositive, UrgencyLevel::Normal);
    req.status = RequestStatus::Completed;
    h.requests.insert(req.clone());

    let created = h
        .engine
        .notify_eligible(RequestId::from(req.id))
        .await
        .unwrap();
    assert_eq!(created, 0);
    assert!(h.notifications.all().is_empty());
}
