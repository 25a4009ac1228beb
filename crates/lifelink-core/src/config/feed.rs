//! Change-feed configuration.

use serde::{Deserialize, Serialize};

/// Change-feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Internal buffer size for the broadcast channel backing the feed.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}
