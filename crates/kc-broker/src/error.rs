//! Broker error types.
//!
//! Claim absence is never an error: a missing or malformed claim only makes
//! the membership decision `false`. The errors here are the ones that abort
//! a single mapper's synchronization call.

use thiserror::Error;

/// Errors that can occur while synchronizing brokered role mappings.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The configured local role reference does not resolve in the store.
    #[error("Unable to find role: {0}")]
    RoleNotFound(String),

    /// Mapper configuration is incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage failure while looking up or mutating role mappings.
    #[error("Storage error: {0}")]
    Storage(#[from] kc_storage::StorageError),
}

impl BrokerError {
    /// Creates a role not found error.
    #[must_use]
    pub fn role_not_found(role: impl Into<String>) -> Self {
        Self::RoleNotFound(role.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Checks if this is a role not found error.
    #[must_use]
    pub const fn is_role_not_found(&self) -> bool {
        matches!(self, Self::RoleNotFound(_))
    }

    /// Checks if this error came from the storage layer.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;
