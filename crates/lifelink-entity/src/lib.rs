//! # lifelink-entity
//!
//! Domain entity models for LifeLink. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod blood;
pub mod donor;
pub mod notification;
pub mod request;
