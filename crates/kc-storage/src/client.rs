//! Client storage provider trait.

use async_trait::async_trait;
use kc_model::Client;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for client storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Creates a new client.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a client with the same `client_id` exists.
    async fn create(&self, client: &Client) -> StorageResult<()>;

    /// Gets a client by `client_id` (OAuth client identifier).
    async fn get_by_client_id(
        &self,
        realm_id: Uuid,
        client_id: &str,
    ) -> StorageResult<Option<Client>>;
}
