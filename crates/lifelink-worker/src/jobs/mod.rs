//! Built-in job implementations.

pub mod notification;

pub use notification::{NotificationRetentionJob, RetentionReport};
