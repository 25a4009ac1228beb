//! Request watcher — live delivery plus a reconciliation backstop.
//!
//! The watcher subscribes to the change feed and runs resolve + dispatch
//! for every creation event. Because the feed can lag, drop, or close,
//! a periodic reconciliation scan re-dispatches all open requests; the
//! dispatcher's idempotent inserts make the overlap safe.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing;

use lifelink_core::config::watcher::WatcherConfig;
use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::events::{RequestEvent, RequestEventPayload};
use lifelink_core::result::AppResult;
use lifelink_core::traits::{ChangeFeed, FeedItem, FeedSubscription};
use lifelink_database::store::RequestStore;
use lifelink_entity::blood::BloodType;
use lifelink_service::MatchingEngine;

/// Lifecycle state of the request watcher, published to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherStatus {
    /// Not yet subscribed.
    Idle,
    /// Subscribed and waiting for events.
    Subscribed,
    /// Handling a creation event.
    Delivering,
    /// Running a reconciliation scan.
    Reconciling,
    /// Live subscription lost; reconciliation maintains correctness
    /// until resubscription succeeds.
    Degraded,
    /// Shut down.
    Closed,
}

/// Watches the change feed for new blood requests and fans notifications
/// out to eligible donors.
#[derive(Debug)]
pub struct RequestWatcher {
    /// Change feed to subscribe on.
    feed: Arc<dyn ChangeFeed>,
    /// Matching engine for resolve + dispatch.
    engine: Arc<MatchingEngine>,
    /// Request store for reconciliation scans.
    requests: Arc<dyn RequestStore>,
    /// Watcher configuration.
    config: WatcherConfig,
}

/// Handle to a running watcher. Stopping releases the subscription and
/// cancels the reconciliation timer.
#[derive(Debug)]
pub struct WatcherHandle {
    /// Shutdown signal.
    cancel: watch::Sender<bool>,
    /// Latest published status.
    status: watch::Receiver<WatcherStatus>,
    /// The spawned watch loop.
    task: tokio::task::JoinHandle<()>,
}

impl WatcherHandle {
    /// The watcher's current status.
    pub fn status(&self) -> WatcherStatus {
        *self.status.borrow()
    }

    /// A receiver that observes status transitions.
    pub fn status_stream(&self) -> watch::Receiver<WatcherStatus> {
        self.status.clone()
    }

    /// Signal shutdown and wait for the watch loop to finish.
    pub async fn stop(self) -> AppResult<()> {
        let _ = self.cancel.send(true);
        self.task
            .await
            .map_err(|e| AppError::internal(format!("Watcher task failed: {e}")))
    }
}

impl RequestWatcher {
    /// Creates a new request watcher.
    pub fn new(
        feed: Arc<dyn ChangeFeed>,
        engine: Arc<MatchingEngine>,
        requests: Arc<dyn RequestStore>,
        config: WatcherConfig,
    ) -> Self {
        Self {
            feed,
            engine,
            requests,
            config,
        }
    }

    /// Subscribe to the change feed and start the watch loop.
    ///
    /// Subscription failure is returned to the caller; whether and when
    /// to retry is the caller's decision, the watcher does not loop on
    /// it internally.
    pub async fn start(self) -> AppResult<WatcherHandle> {
        let (status_tx, status_rx) = watch::channel(WatcherStatus::Idle);

        let subscription = self.feed.subscribe().await.map_err(|e| {
            AppError::subscription(format!("Failed to subscribe to change feed: {e}"))
        })?;
        let _ = status_tx.send(WatcherStatus::Subscribed);

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(subscription, cancel_rx, status_tx));

        Ok(WatcherHandle {
            cancel: cancel_tx,
            status: status_rx,
            task,
        })
    }

    /// The watch loop. Runs until the cancel signal is received.
    async fn run(
        self,
        subscription: FeedSubscription,
        mut cancel: watch::Receiver<bool>,
        status: watch::Sender<WatcherStatus>,
    ) {
        tracing::info!(
            reconcile_interval = self.config.reconcile_interval_seconds,
            "Request watcher started"
        );

        let mut subscription = Some(subscription);

        // The first tick fires immediately: the startup reconciliation
        // scan that covers events published before we subscribed.
        let interval_seconds = self.config.reconcile_interval_seconds.max(1);
        let mut tick = time::interval(Duration::from_secs(interval_seconds));
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Request watcher received shutdown signal");
                        break;
                    }
                }
                item = Self::next_item(&mut subscription) => match item {
                    FeedItem::Event(event) => {
                        let _ = status.send(WatcherStatus::Delivering);
                        self.handle_event(event).await;
                        let _ = status.send(WatcherStatus::Subscribed);
                    }
                    FeedItem::Lagged(skipped) => {
                        tracing::warn!(
                            skipped,
                            "Change feed lagged; reconciliation will cover missed events"
                        );
                    }
                    FeedItem::Closed => {
                        tracing::warn!("Change feed closed; degrading to reconciliation only");
                        subscription = None;
                        let _ = status.send(WatcherStatus::Degraded);
                    }
                },
                _ = tick.tick() => {
                    let _ = status.send(WatcherStatus::Reconciling);
                    self.reconcile().await;

                    if subscription.is_none() {
                        match self.feed.subscribe().await {
                            Ok(sub) => {
                                tracing::info!("Change feed resubscribed");
                                subscription = Some(sub);
                                let _ = status.send(WatcherStatus::Subscribed);
                            }
                            Err(e) => {
                                tracing::warn!("Resubscription failed, staying degraded: {e}");
                                let _ = status.send(WatcherStatus::Degraded);
                            }
                        }
                    } else {
                        let _ = status.send(WatcherStatus::Subscribed);
                    }
                }
            }
        }

        let _ = status.send(WatcherStatus::Closed);
        tracing::info!("Request watcher shut down");
    }

    /// Pull the next feed item, or park while degraded so the select
    /// loop only sees cancel and reconciliation ticks.
    async fn next_item(subscription: &mut Option<FeedSubscription>) -> FeedItem {
        match subscription {
            Some(sub) => sub.next().await,
            None => std::future::pending().await,
        }
    }

    /// Handle one feed event. Errors are contained here: a malformed or
    /// stale event is skipped with a warning, a store failure is left
    /// for the next reconciliation pass. Nothing tears down the loop.
    async fn handle_event(&self, event: RequestEvent) {
        match event.payload {
            RequestEventPayload::Created {
                request_id,
                ref blood_type,
                ..
            } => {
                if blood_type.parse::<BloodType>().is_err() {
                    tracing::warn!(
                        %request_id,
                        %blood_type,
                        "Skipping creation event with malformed blood type"
                    );
                    return;
                }

                match self.engine.notify_eligible(request_id).await {
                    Ok(created) => {
                        tracing::debug!(%request_id, created, "Delivered creation event");
                    }
                    Err(e) if e.kind == ErrorKind::NotFound => {
                        tracing::warn!(%request_id, "Skipping creation event for unknown request");
                    }
                    Err(e) => {
                        tracing::warn!(
                            %request_id,
                            "Delivery failed, leaving for reconciliation: {e}"
                        );
                    }
                }
            }
            RequestEventPayload::StatusChanged {
                request_id,
                ref status,
            } => {
                tracing::trace!(%request_id, %status, "Ignoring status change event");
            }
        }
    }

    /// Re-run resolve + dispatch over all open requests. Idempotent
    /// inserts make overlap with live delivery safe.
    async fn reconcile(&self) {
        let requests = match self.requests.query_pending_or_active().await {
            Ok(requests) => requests,
            Err(e) => {
                tracing::warn!("Reconciliation scan failed, will retry next interval: {e}");
                return;
            }
        };

        let mut created_total = 0u64;
        for request in &requests {
            match self.engine.notify_request(request).await {
                Ok(created) => created_total += created,
                Err(e) => {
                    tracing::warn!(
                        request_id = %request.id,
                        "Reconciliation dispatch failed: {e}"
                    );
                }
            }
        }

        if created_total > 0 {
            tracing::info!(
                open_requests = requests.len(),
                created = created_total,
                "Reconciliation created missed notifications"
            );
        } else {
            tracing::debug!(open_requests = requests.len(), "Reconciliation scan complete");
        }
    }
}
