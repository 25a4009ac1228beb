//! Capability contracts consumed across crate boundaries.

pub mod feed;

pub use feed::{ChangeFeed, FeedItem, FeedSubscription};
