//! # lifelink-service
//!
//! Business logic service layer for LifeLink. Each service orchestrates
//! the storage capabilities and the change feed to implement
//! application-level use cases, with the blood-type compatibility and
//! donor-notification matching engine at the center.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod compatibility;
pub mod context;
pub mod donor;
pub mod matching;
pub mod notification;
pub mod request;

pub use context::RequestContext;
pub use donor::DonorService;
pub use matching::{EligibleDonorResolver, MatchingEngine, NotificationDispatcher};
pub use notification::NotificationService;
pub use request::RequestService;
