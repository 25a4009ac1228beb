//! Request watcher configuration.

use serde::{Deserialize, Serialize};

/// Request watcher configuration.
///
/// The watcher delivers notifications for creation events from the live
/// change feed and re-scans open requests on a fixed interval as a
/// correctness backstop for missed events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Whether the watcher is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between reconciliation scans.
    #[serde(default = "default_reconcile_interval")]
    pub reconcile_interval_seconds: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reconcile_interval_seconds: default_reconcile_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_reconcile_interval() -> u64 {
    60
}
