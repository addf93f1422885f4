//! Local role lookup and role-mapping mutation.

use std::sync::Arc;

use kc_model::{Role, RoleRef, User};
use kc_storage::{ClientProvider, RoleProvider, UserProvider};
use uuid::Uuid;

use crate::error::{BrokerError, BrokerResult};
use crate::sync::SyncAction;

/// Resolves local roles and grants or revokes them.
///
/// Grants and revokes are idempotent: the current mapping is read first and
/// the store is only written when it differs from the requested state.
#[derive(Clone)]
pub struct RoleMutator {
    roles: Arc<dyn RoleProvider>,
    clients: Arc<dyn ClientProvider>,
    users: Arc<dyn UserProvider>,
}

impl RoleMutator {
    /// Creates a mutator over the given providers.
    #[must_use]
    pub fn new(
        roles: Arc<dyn RoleProvider>,
        clients: Arc<dyn ClientProvider>,
        users: Arc<dyn UserProvider>,
    ) -> Self {
        Self {
            roles,
            clients,
            users,
        }
    }

    /// Creates a mutator backed by a single store implementing every provider.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: RoleProvider + ClientProvider + UserProvider + 'static,
    {
        Self {
            roles: store.clone(),
            clients: store.clone(),
            users: store,
        }
    }

    /// Resolves a `client.role` or `role` reference to a local role.
    ///
    /// ## Errors
    ///
    /// Returns `BrokerError::RoleNotFound` if the client or role does not
    /// exist, or `BrokerError::Storage` if the lookup fails.
    pub async fn resolve_local_role(&self, realm_id: Uuid, raw: &str) -> BrokerResult<Role> {
        let reference = RoleRef::parse(raw);
        let role = match reference.scope() {
            None => {
                self.roles
                    .get_realm_role_by_name(realm_id, &reference.name)
                    .await?
            }
            Some(client_id) => match self.clients.get_by_client_id(realm_id, client_id).await? {
                Some(client) => {
                    self.roles
                        .get_client_role_by_name(realm_id, client.id, &reference.name)
                        .await?
                }
                None => None,
            },
        };

        role.ok_or_else(|| {
            tracing::warn!(%realm_id, role = raw, "Local role not found");
            BrokerError::role_not_found(raw)
        })
    }

    /// Ensures the user holds the role.
    ///
    /// Returns `true` if a mapping was added.
    ///
    /// ## Errors
    ///
    /// Returns `BrokerError::Storage` if the store fails.
    pub async fn grant(&self, user: &User, role: &Role) -> BrokerResult<bool> {
        if self.users.has_role(user.realm_id, user.id, role.id).await? {
            tracing::debug!(user = %user.username, role = %role.name, "Role already granted");
            return Ok(false);
        }
        self.users
            .grant_role(user.realm_id, user.id, role.id)
            .await?;
        tracing::info!(user = %user.username, role = %role.name, "Granted brokered role");
        Ok(true)
    }

    /// Ensures the user does not hold the role.
    ///
    /// Returns `true` if a mapping was removed.
    ///
    /// ## Errors
    ///
    /// Returns `BrokerError::Storage` if the store fails.
    pub async fn revoke(&self, user: &User, role: &Role) -> BrokerResult<bool> {
        if !self.users.has_role(user.realm_id, user.id, role.id).await? {
            tracing::debug!(user = %user.username, role = %role.name, "Role not held");
            return Ok(false);
        }
        self.users
            .revoke_role(user.realm_id, user.id, role.id)
            .await?;
        tracing::info!(user = %user.username, role = %role.name, "Revoked brokered role");
        Ok(true)
    }

    /// Applies a sync action. Returns `true` if the store changed.
    ///
    /// ## Errors
    ///
    /// Returns `BrokerError::Storage` if the store fails.
    pub async fn apply(&self, action: SyncAction, user: &User, role: &Role) -> BrokerResult<bool> {
        match action {
            SyncAction::Grant => self.grant(user, role).await,
            SyncAction::Revoke => self.revoke(user, role).await,
            SyncAction::NoOp => Ok(false),
        }
    }
}

impl std::fmt::Debug for RoleMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleMutator").finish_non_exhaustive()
    }
}
