//! Donor repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::donor::Donor;

use crate::store::DonorDirectory;

use super::{is_policy_recursion, is_unique_violation};

/// Repository for donor directory operations.
#[derive(Debug, Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    /// Create a new donor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonorDirectory for DonorRepository {
    async fn find_available(&self) -> AppResult<Vec<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE is_available = TRUE")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                if is_policy_recursion(&e) {
                    tracing::debug!("Donor query hit policy recursion; left for retry");
                }
                AppError::with_source(ErrorKind::Database, "Failed to list available donors", e)
            })
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donor", e))
    }

    async fn create(&self, donor: &Donor) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "INSERT INTO donors (id, user_id, blood_type, is_available, contact_number, location, last_donation_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(donor.id)
        .bind(donor.user_id)
        .bind(donor.blood_type)
        .bind(donor.is_available)
        .bind(&donor.contact_number)
        .bind(&donor.location)
        .bind(donor.last_donation_date)
        .bind(donor.created_at)
        .bind(donor.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("A donor profile already exists for this user")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create donor", e)
            }
        })
    }

    async fn set_availability(&self, user_id: Uuid, available: bool) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE donors SET is_available = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(available)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set availability", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("No donor profile for this user"));
        }
        Ok(())
    }

    async fn record_donation(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE donors SET last_donation_date = $2, is_available = FALSE, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record donation", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("No donor profile for this user"));
        }
        Ok(())
    }
}
