//! User storage provider trait.

use async_trait::async_trait;
use kc_model::User;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for user storage and role-mapping operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Creates a new user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a user with the same username exists.
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Gets a user by ID.
    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<User>>;

    /// Grants a role to a user.
    ///
    /// Granting a role the user already holds succeeds without change.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn grant_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()>;

    /// Revokes a role from a user.
    ///
    /// Revoking a role the user does not hold succeeds without change.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn revoke_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()>;

    /// Gets the roles granted to a user (direct grants only).
    async fn get_roles(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<Vec<Uuid>>;

    /// Checks if a user directly holds a specific role.
    async fn has_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<bool>;
}
