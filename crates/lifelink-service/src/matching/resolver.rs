//! Eligible donor resolution.

use std::sync::Arc;

use lifelink_core::result::AppResult;
use lifelink_database::store::DonorDirectory;
use lifelink_entity::donor::Donor;
use lifelink_entity::request::BloodRequest;

use crate::compatibility::can_donate;

/// Resolves the set of donors eligible to fulfill a request.
///
/// No state is cached; every call re-reads the donor directory and
/// accepts eventual consistency with the backing store.
#[derive(Debug, Clone)]
pub struct EligibleDonorResolver {
    /// Donor directory read capability.
    directory: Arc<dyn DonorDirectory>,
}

impl EligibleDonorResolver {
    /// Creates a new resolver.
    pub fn new(directory: Arc<dyn DonorDirectory>) -> Self {
        Self { directory }
    }

    /// The currently-available donors whose blood type is compatible
    /// with the request.
    ///
    /// An empty result is not an error. Unavailable donors are excluded
    /// even if the directory returns them, regardless of type match.
    pub async fn resolve(&self, request: &BloodRequest) -> AppResult<Vec<Donor>> {
        let donors = self.directory.find_available().await?;

        Ok(donors
            .into_iter()
            .filter(|donor| donor.is_available && can_donate(donor.blood_type, request.blood_type))
            .collect())
    }
}
