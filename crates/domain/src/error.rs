//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SalonBookError`] via `#[from]`.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum SalonBookError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    #[error("booking reference space exhausted")]
    ReferenceExhausted(#[from] ExhaustedError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("customer name must not be empty")]
    EmptyCustomerName,

    #[error("customer phone must not be empty")]
    EmptyCustomerPhone,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("duration must be greater than zero")]
    ZeroDuration,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid booking reference: {0}")]
    InvalidReference(String),

    #[error("unrecognised date: {0}")]
    InvalidDate(String),

    #[error("unrecognised time of day: {0}")]
    InvalidTime(String),

    #[error("unknown booking status: {0}")]
    UnknownStatus(String),

    #[error("cannot move booking from {from} to {to}")]
    InvalidStatusTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// A lookup by id or key returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A write was rejected because it would duplicate a unique value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with {field} {value} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
}

/// Every candidate drawn by the reference allocator was already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no free booking reference found after {attempts} attempts")]
pub struct ExhaustedError {
    pub attempts: u32,
}
