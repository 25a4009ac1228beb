//! # lifelink-realtime
//!
//! Change-feed transport for LifeLink. Provides the in-memory broadcast
//! implementation of the [`ChangeFeed`] capability for single-node
//! deployments.
//!
//! [`ChangeFeed`]: lifelink_core::traits::ChangeFeed

pub mod feed;

pub use feed::MemoryChangeFeed;
