//! Donor profile management.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::store::DonorDirectory;
use lifelink_entity::donor::{Donor, DonorRegistration};

use crate::context::RequestContext;

/// Manages donor registration and availability.
#[derive(Debug, Clone)]
pub struct DonorService {
    /// Donor directory.
    directory: Arc<dyn DonorDirectory>,
}

impl DonorService {
    /// Creates a new donor service.
    pub fn new(directory: Arc<dyn DonorDirectory>) -> Self {
        Self { directory }
    }

    /// Registers the current user as a donor.
    ///
    /// One donor profile per user; a second registration is a conflict.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        registration: &DonorRegistration,
    ) -> AppResult<Donor> {
        registration
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid donor registration: {e}")))?;

        let donor = Donor::from_registration(ctx.user_id, registration);
        let created = self.directory.create(&donor).await?;

        info!(
            donor_id = %created.id,
            blood_type = %created.blood_type,
            "Registered new donor"
        );
        Ok(created)
    }

    /// Fetches the current user's donor profile, if any.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<Option<Donor>> {
        self.directory.find_by_user(ctx.user_id).await
    }

    /// Updates the current user's availability flag.
    pub async fn set_availability(&self, ctx: &RequestContext, available: bool) -> AppResult<()> {
        self.directory
            .set_availability(ctx.user_id, available)
            .await
    }

    /// Records a completed donation for the current user: stores the
    /// donation date and marks the donor unavailable until they opt back
    /// in.
    pub async fn record_donation(&self, ctx: &RequestContext, date: NaiveDate) -> AppResult<()> {
        self.directory.record_donation(ctx.user_id, date).await
    }
}
