//! Concrete PostgreSQL repository implementations.

pub mod donor;
pub mod notification;
pub mod request;

pub use donor::DonorRepository;
pub use notification::NotificationRepository;
pub use request::RequestRepository;

/// SQLSTATE for a unique-constraint violation.
pub(crate) const UNIQUE_VIOLATION_CODE: &str = "23505";

/// SQLSTATE raised when a row-security policy evaluates recursively.
/// Deployments layering row-level security over these tables hit it on
/// otherwise-healthy queries; it is suppressed from error-level logs and
/// left to the next reconciliation pass like any other store failure.
pub(crate) const POLICY_RECURSION_CODE: &str = "42P17";

/// Whether an sqlx error is the known-benign policy-recursion condition.
pub(crate) fn is_policy_recursion(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(POLICY_RECURSION_CODE)
    )
}

/// Whether an sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION_CODE)
    )
}
