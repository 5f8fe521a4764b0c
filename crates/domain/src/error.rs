//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DeviceHubError`] via `#[from]`.

use crate::lifecycle::RuleViolation;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum DeviceHubError {
    /// Malformed input: blank fields, unknown state token, bad identifier.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The requested change is forbidden in the device's current state.
    #[error(transparent)]
    RuleViolation(#[from] RuleViolation),

    /// Opaque infrastructure failure from a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that can never be accepted, whatever the state of the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("brand must not be empty")]
    EmptyBrand,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up.
    pub entity: &'static str,
    /// Identifier that was requested.
    pub id: String,
}
