//! Request urgency enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "urgency_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Immediate need.
    Critical,
    /// Needed within 24 hours.
    Urgent,
    /// Needed within days.
    Normal,
    /// Planned for a future date.
    Scheduled,
}

impl UrgencyLevel {
    /// Whether this level warrants urgent treatment in notifications.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::Critical | Self::Urgent)
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Urgent => "urgent",
            Self::Normal => "normal",
            Self::Scheduled => "scheduled",
        }
    }
}

impl Default for UrgencyLevel {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "urgent" => Ok(Self::Urgent),
            "normal" => Ok(Self::Normal),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid urgency level: '{s}'. Expected one of: critical, urgent, normal, scheduled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_urgent() {
        assert!(UrgencyLevel::Critical.is_urgent());
        assert!(UrgencyLevel::Urgent.is_urgent());
        assert!(!UrgencyLevel::Normal.is_urgent());
        assert!(!UrgencyLevel::Scheduled.is_urgent());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("urgent".parse::<UrgencyLevel>().unwrap(), UrgencyLevel::Urgent);
        assert_eq!("CRITICAL".parse::<UrgencyLevel>().unwrap(), UrgencyLevel::Critical);
        assert!("asap".parse::<UrgencyLevel>().is_err());
    }
}
