//! Domain error taxonomy

use thiserror::Error;

use super::booking::BookingStatus;

/// Domain-level error types.
///
/// Every precondition violation surfaces as a typed variant; callers
/// branch on the variant, never on message text.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Malformed input: bad date order, guest counts, stay length, capacity.
    #[error("Validation: {0}")]
    Validation(String),

    /// Unknown entity reference.
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Role or ownership check failed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Availability lost between check and commit, or a date range
    /// that is already taken/blocked.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested status change is not allowed from the current status.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Storage failure or transaction rollback. Logged and surfaced
    /// without leaking internals.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Internal(format!("database error: {}", e))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
