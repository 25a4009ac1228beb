//! Change-feed capability contract.
//!
//! The feed delivers [`RequestEvent`]s to subscribers. Implementations own
//! the transport; consumers hold a [`FeedSubscription`] and drain it with
//! [`FeedSubscription::next`]. Dropping the subscription unsubscribes.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::events::RequestEvent;
use crate::result::AppResult;

/// Publish/subscribe capability for blood-request events.
#[async_trait]
pub trait ChangeFeed: std::fmt::Debug + Send + Sync + 'static {
    /// Establish a new subscription over the creation-event stream.
    async fn subscribe(&self) -> AppResult<FeedSubscription>;

    /// Publish an event to all current subscribers.
    async fn publish(&self, event: RequestEvent) -> AppResult<()>;
}

/// A live subscription handle over the change feed.
///
/// Wraps a broadcast receiver; the subscription is released when the
/// handle is dropped.
#[derive(Debug)]
pub struct FeedSubscription {
    receiver: broadcast::Receiver<RequestEvent>,
}

/// One item pulled off a feed subscription.
#[derive(Debug, Clone)]
pub enum FeedItem {
    /// The next event in the stream.
    Event(RequestEvent),
    /// The subscriber fell behind and `skipped` events were dropped.
    Lagged(u64),
    /// The feed shut down; no further events will arrive.
    Closed,
}

impl FeedSubscription {
    /// Wrap a broadcast receiver as a subscription handle.
    pub fn new(receiver: broadcast::Receiver<RequestEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next feed item.
    ///
    /// Lag and closure are reported as items rather than errors so callers
    /// can degrade to reconciliation instead of tearing down.
    pub async fn next(&mut self) -> FeedItem {
        match self.receiver.recv().await {
            Ok(event) => FeedItem::Event(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => FeedItem::Lagged(skipped),
            Err(broadcast::error::RecvError::Closed) => FeedItem::Closed,
        }
    }
}
