//! Blood request entity.

pub mod draft;
pub mod model;
pub mod status;
pub mod urgency;

pub use draft::BloodRequestDraft;
pub use model::BloodRequest;
pub use status::RequestStatus;
pub use urgency::UrgencyLevel;
