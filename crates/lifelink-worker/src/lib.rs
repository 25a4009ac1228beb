//! Background processing for LifeLink.
//!
//! This crate provides:
//! - The request watcher: live change-feed delivery with a periodic
//!   reconciliation scan as a correctness backstop
//! - A cron scheduler for notification retention tasks
//! - Built-in job implementations for retention

pub mod jobs;
pub mod scheduler;
pub mod watcher;

pub use scheduler::CronScheduler;
pub use watcher::{RequestWatcher, WatcherHandle, WatcherStatus};
