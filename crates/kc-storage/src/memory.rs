//! In-memory storage backend.
//!
//! Implements every provider trait over process-local maps. Used for
//! embedding and tests; data does not survive the process.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use kc_model::{Client, Role, User};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::client::ClientProvider;
use crate::error::{StorageError, StorageResult};
use crate::role::RoleProvider;
use crate::user::UserProvider;

#[derive(Debug, Default)]
struct State {
    clients: HashMap<Uuid, Client>,
    roles: HashMap<Uuid, Role>,
    users: HashMap<Uuid, User>,
    /// User ID to directly granted role IDs.
    role_mappings: HashMap<Uuid, HashSet<Uuid>>,
}

impl State {
    fn user_in_realm(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<()> {
        match self.users.get(&user_id) {
            Some(user) if user.realm_id == realm_id => Ok(()),
            _ => Err(StorageError::not_found("User", user_id)),
        }
    }

    fn role_in_realm(&self, realm_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        match self.roles.get(&role_id) {
            Some(role) if role.realm_id == realm_id => Ok(()),
            _ => Err(StorageError::not_found("Role", role_id)),
        }
    }
}

/// Storage backend holding all entities in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientProvider for InMemoryStore {
    async fn create(&self, client: &Client) -> StorageResult<()> {
        let mut state = self.state.write();
        let exists = state
            .clients
            .values()
            .any(|c| c.realm_id == client.realm_id && c.client_id == client.client_id);
        if exists {
            return Err(StorageError::duplicate(
                "Client",
                "client_id",
                client.client_id.clone(),
            ));
        }
        state.clients.insert(client.id, client.clone());
        Ok(())
    }

    async fn get_by_client_id(
        &self,
        realm_id: Uuid,
        client_id: &str,
    ) -> StorageResult<Option<Client>> {
        let state = self.state.read();
        Ok(state
            .clients
            .values()
            .find(|c| c.realm_id == realm_id && c.client_id == client_id)
            .cloned())
    }
}

#[async_trait]
impl RoleProvider for InMemoryStore {
    async fn create(&self, role: &Role) -> StorageResult<()> {
        let mut state = self.state.write();
        if let Some(client_id) = role.client_id {
            if !state.clients.contains_key(&client_id) {
                return Err(StorageError::not_found("Client", client_id));
            }
        }
        let exists = state.roles.values().any(|r| {
            r.realm_id == role.realm_id && r.client_id == role.client_id && r.name == role.name
        });
        if exists {
            return Err(StorageError::duplicate("Role", "name", role.name.clone()));
        }
        state.roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Role>> {
        let state = self.state.read();
        Ok(state
            .roles
            .get(&id)
            .filter(|r| r.realm_id == realm_id)
            .cloned())
    }

    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        let state = self.state.read();
        Ok(state
            .roles
            .values()
            .find(|r| r.realm_id == realm_id && r.is_realm_role() && r.name == name)
            .cloned())
    }

    async fn get_client_role_by_name(
        &self,
        realm_id: Uuid,
        client_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        let state = self.state.read();
        Ok(state
            .roles
            .values()
            .find(|r| r.realm_id == realm_id && r.client_id == Some(client_id) && r.name == name)
            .cloned())
    }
}

#[async_trait]
impl UserProvider for InMemoryStore {
    async fn create(&self, user: &User) -> StorageResult<()> {
        let mut state = self.state.write();
        let exists = state
            .users
            .values()
            .any(|u| u.realm_id == user.realm_id && u.username == user.username);
        if exists {
            return Err(StorageError::duplicate(
                "User",
                "username",
                user.username.clone(),
            ));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<User>> {
        let state = self.state.read();
        Ok(state
            .users
            .get(&id)
            .filter(|u| u.realm_id == realm_id)
            .cloned())
    }

    async fn grant_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        let mut state = self.state.write();
        state.user_in_realm(realm_id, user_id)?;
        state.role_in_realm(realm_id, role_id)?;
        state.role_mappings.entry(user_id).or_default().insert(role_id);
        Ok(())
    }

    async fn revoke_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        let mut state = self.state.write();
        state.user_in_realm(realm_id, user_id)?;
        if let Some(granted) = state.role_mappings.get_mut(&user_id) {
            granted.remove(&role_id);
        }
        Ok(())
    }

    async fn get_roles(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<Vec<Uuid>> {
        let state = self.state.read();
        state.user_in_realm(realm_id, user_id)?;
        Ok(state
            .role_mappings
            .get(&user_id)
            .map(|granted| granted.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn has_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<bool> {
        let state = self.state.read();
        state.user_in_realm(realm_id, user_id)?;
        Ok(state
            .role_mappings
            .get(&user_id)
            .is_some_and(|granted| granted.contains(&role_id)))
    }
}
