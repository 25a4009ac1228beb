//! Donor entity.

pub mod model;
pub mod registration;

pub use model::Donor;
pub use registration::DonorRegistration;
