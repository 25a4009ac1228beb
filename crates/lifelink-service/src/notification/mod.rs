//! Notification read model.

pub mod service;

pub use service::NotificationService;
