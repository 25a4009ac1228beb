//! In-memory donor directory.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::store::DonorDirectory;
use lifelink_entity::donor::Donor;

/// In-memory implementation of [`DonorDirectory`].
#[derive(Debug, Default)]
pub struct MemoryDonorDirectory {
    donors: Mutex<Vec<Donor>>,
}

impl MemoryDonorDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory seeded with donors.
    pub fn with_donors(donors: Vec<Donor>) -> Self {
        Self {
            donors: Mutex::new(donors),
        }
    }

    /// Insert a donor directly, bypassing uniqueness checks.
    pub fn insert(&self, donor: Donor) {
        self.lock().push(donor);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Donor>> {
        self.donors.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DonorDirectory for MemoryDonorDirectory {
    async fn find_available(&self) -> AppResult<Vec<Donor>> {
        Ok(self
            .lock()
            .iter()
            .filter(|d| d.is_available)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Donor>> {
        Ok(self.lock().iter().find(|d| d.user_id == user_id).cloned())
    }

    async fn create(&self, donor: &Donor) -> AppResult<Donor> {
        let mut donors = self.lock();
        if donors.iter().any(|d| d.user_id == donor.user_id) {
            return Err(AppError::conflict(
                "A donor profile already exists for this user",
            ));
        }
        donors.push(donor.clone());
        Ok(donor.clone())
    }

    async fn set_availability(&self, user_id: Uuid, available: bool) -> AppResult<()> {
        let mut donors = self.lock();
        match donors.iter_mut().find(|d| d.user_id == user_id) {
            Some(donor) => {
                donor.is_available = available;
                Ok(())
            }
            None => Err(AppError::not_found("No donor profile for this user")),
        }
    }

    async fn record_donation(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        let mut donors = self.lock();
        match donors.iter_mut().find(|d| d.user_id == user_id) {
            Some(donor) => {
                donor.last_donation_date = Some(date);
                donor.is_available = false;
                Ok(())
            }
            None => Err(AppError::not_found("No donor profile for this user")),
        }
    }
}
