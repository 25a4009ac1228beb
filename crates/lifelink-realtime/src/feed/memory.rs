//! In-memory change feed for single-node deployments.

use async_trait::async_trait;
use tokio::sync::broadcast;

use lifelink_core::config::feed::FeedConfig;
use lifelink_core::events::RequestEvent;
use lifelink_core::result::AppResult;
use lifelink_core::traits::{ChangeFeed, FeedSubscription};

/// In-memory broadcast implementation of the change feed.
///
/// Every subscriber gets its own buffered receiver; slow subscribers see
/// lag items rather than blocking publishers.
#[derive(Debug)]
pub struct MemoryChangeFeed {
    /// Broadcast sender fanning events out to all subscriptions.
    sender: broadcast::Sender<RequestEvent>,
}

impl MemoryChangeFeed {
    /// Create a new in-memory feed with the given per-subscriber buffer.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Create a feed from configuration.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.channel_buffer_size)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl ChangeFeed for MemoryChangeFeed {
    async fn subscribe(&self) -> AppResult<FeedSubscription> {
        Ok(FeedSubscription::new(self.sender.subscribe()))
    }

    async fn publish(&self, event: RequestEvent) -> AppResult<()> {
        // A send error only means there are no subscribers right now;
        // reconciliation covers anything published into the void.
        if self.sender.send(event).is_err() {
            tracing::trace!("Request event published with no live subscribers");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelink_core::events::RequestEventPayload;
    use lifelink_core::traits::FeedItem;
    use lifelink_core::types::id::RequestId;

    fn created_event() -> RequestEvent {
        RequestEvent::new(RequestEventPayload::Created {
            request_id: RequestId::new(),
            blood_type: "O+".to_string(),
            urgency: "urgent".to_string(),
        })
    }

    #[tokio::test]
    async fn test_subscribe_then_receive() {
        let feed = MemoryChangeFeed::new(8);
        let mut sub = feed.subscribe().await.unwrap();

        let event = created_event();
        feed.publish(event.clone()).await.unwrap();

        match sub.next().await {
            FeedItem::Event(got) => assert_eq!(got.request_id(), event.request_id()),
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let feed = MemoryChangeFeed::new(8);
        assert_eq!(feed.subscriber_count(), 0);
        feed.publish(created_event()).await.unwrap();
    }

    #[tokio::test]
    async fn test_slow_subscriber_sees_lag() {
        let feed = MemoryChangeFeed::new(1);
        let mut sub = feed.subscribe().await.unwrap();

        feed.publish(created_event()).await.unwrap();
        feed.publish(created_event()).await.unwrap();
        feed.publish(created_event()).await.unwrap();

        match sub.next().await {
            FeedItem::Lagged(skipped) => assert!(skipped >= 1),
            other => panic!("expected lag, got {other:?}"),
        }
    }
}
