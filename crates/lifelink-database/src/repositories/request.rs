//! Blood request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::request::BloodRequest;

use crate::store::RequestStore;

/// Repository for blood request operations.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn get(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch request", e))
    }

    async fn query_pending_or_active(&self) -> AppResult<Vec<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "SELECT * FROM blood_requests WHERE status IN ('pending', 'active') \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list open requests", e))
    }

    async fn create(&self, request: &BloodRequest) -> AppResult<BloodRequest> {
        sqlx::query_as::<_, BloodRequest>(
            "INSERT INTO blood_requests (id, requester_id, patient_name, blood_type, units, hospital, location, required_date, contact_name, contact_phone, urgency_level, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(request.id)
        .bind(request.requester_id)
        .bind(&request.patient_name)
        .bind(request.blood_type)
        .bind(request.units)
        .bind(&request.hospital)
        .bind(&request.location)
        .bind(request.required_date)
        .bind(&request.contact_name)
        .bind(&request.contact_phone)
        .bind(request.urgency_level)
        .bind(request.status)
        .bind(request.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }
}
