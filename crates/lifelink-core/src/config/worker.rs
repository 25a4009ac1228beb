//! Background retention worker configuration.

use serde::{Deserialize, Serialize};

/// Notification retention worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the retention worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of days after which stored notifications are cleaned up.
    #[serde(default = "default_cleanup_days")]
    pub cleanup_after_days: u32,
    /// Maximum stored notifications per user.
    #[serde(default = "default_max_stored")]
    pub max_stored_per_user: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cleanup_after_days: default_cleanup_days(),
            max_stored_per_user: default_max_stored(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cleanup_days() -> u32 {
    30
}

fn default_max_stored() -> u64 {
    1000
}
