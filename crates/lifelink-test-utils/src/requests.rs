//! In-memory request store.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use lifelink_core::result::AppResult;
use lifelink_database::store::RequestStore;
use lifelink_entity::request::BloodRequest;

/// In-memory implementation of [`RequestStore`].
#[derive(Debug, Default)]
pub struct MemoryRequestStore {
    requests: Mutex<Vec<BloodRequest>>,
}

impl MemoryRequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with requests.
    pub fn with_requests(requests: Vec<BloodRequest>) -> Self {
        Self {
            requests: Mutex::new(requests),
        }
    }

    /// Insert a request directly.
    pub fn insert(&self, request: BloodRequest) {
        self.lock().push(request);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BloodRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        Ok(self.lock().iter().find(|r| r.id == id).cloned())
    }

    async fn query_pending_or_active(&self) -> AppResult<Vec<BloodRequest>> {
        let mut open: Vec<BloodRequest> = self
            .lock()
            .iter()
            .filter(|r| r.is_open())
            .cloned()
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(open)
    }

    async fn create(&self, request: &BloodRequest) -> AppResult<BloodRequest> {
        self.lock().push(request.clone());
        Ok(request.clone())
    }
}
