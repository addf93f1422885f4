//! Role storage provider trait.

use async_trait::async_trait;
use kc_model::Role;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for role storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Creates a new role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a role with the same name exists
    /// in the same scope (realm or client).
    async fn create(&self, role: &Role) -> StorageResult<()>;

    /// Gets a role by ID.
    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Role>>;

    /// Gets a realm role by name.
    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>>;

    /// Gets a client role by name.
    ///
    /// `client_id` is the client's internal ID.
    async fn get_client_role_by_name(
        &self,
        realm_id: Uuid,
        client_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>>;
}
