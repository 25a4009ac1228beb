//! # lifelink-database
//!
//! PostgreSQL connection management, storage capability contracts, and the
//! concrete repository implementations for all LifeLink entities.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{DonorDirectory, NotificationStore, RequestStore};
