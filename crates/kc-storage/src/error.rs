//! Storage error types.
//!
//! Backend failures (`Connection`, `Query`) are surfaced unchanged to the
//! caller; the storage layer does not retry.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found in the addressed realm.
    #[error("{entity_type} {id} not found")]
    NotFound {
        /// Type of entity (e.g., "User", "Role").
        entity_type: &'static str,
        /// Entity ID.
        id: Uuid,
    },

    /// Unique constraint violation.
    #[error("Duplicate {entity_type}: {field} '{value}' already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Field that caused the conflict.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// The backend could not be reached.
    #[error("Storage unavailable: {0}")]
    Connection(String),

    /// The backend rejected or failed a query.
    #[error("Storage query failed: {0}")]
    Query(String),

    /// Internal error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a not found error for an entity.
    #[must_use]
    pub const fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(
        entity_type: &'static str,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type,
            field,
            value: value.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Checks if the backend itself failed (as opposed to the request).
    #[must_use]
    pub const fn is_backend_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Query(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
