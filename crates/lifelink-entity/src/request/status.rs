//! Request status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a blood request.
///
/// Requests are created pending/active; completion and cancellation are
/// driven by external workflow. Completed requests are immutable for
/// matching purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Accepted and open for matching.
    Active,
    /// Fulfilled.
    Completed,
    /// Withdrawn.
    Cancelled,
}

impl RequestStatus {
    /// Whether the request is still open for matching.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid request status: '{s}'. Expected one of: pending, active, completed, cancelled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_open() {
        assert!(RequestStatus::Pending.is_open());
        assert!(RequestStatus::Active.is_open());
        assert!(!RequestStatus::Completed.is_open());
        assert!(!RequestStatus::Cancelled.is_open());
    }
}
