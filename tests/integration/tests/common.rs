//! Common test utilities and fixtures.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use kc_broker::{BrokerContext, ClaimSet, RoleMutator};
use kc_model::{Client, Role, User};
use kc_storage::{
    ClientProvider, InMemoryStore, RoleProvider, StorageError, StorageResult, UserProvider,
};
use serde_json::json;
use uuid::Uuid;

/// Store wrapper that counts role-mapping writes and can simulate outages.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    grants: AtomicUsize,
    revokes: AtomicUsize,
    unavailable: AtomicBool,
}

impl CountingStore {
    /// Number of `grant_role` calls that reached the store.
    pub fn grants(&self) -> usize {
        self.grants.load(Ordering::SeqCst)
    }

    /// Number of `revoke_role` calls that reached the store.
    pub fn revokes(&self) -> usize {
        self.revokes.load(Ordering::SeqCst)
    }

    /// Makes every user operation fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::connection("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientProvider for CountingStore {
    async fn create(&self, client: &Client) -> StorageResult<()> {
        ClientProvider::create(&self.inner, client).await
    }

    async fn get_by_client_id(
        &self,
        realm_id: Uuid,
        client_id: &str,
    ) -> StorageResult<Option<Client>> {
        self.inner.get_by_client_id(realm_id, client_id).await
    }
}

#[async_trait]
impl RoleProvider for CountingStore {
    async fn create(&self, role: &Role) -> StorageResult<()> {
        RoleProvider::create(&self.inner, role).await
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Role>> {
        RoleProvider::get_by_id(&self.inner, realm_id, id).await
    }

    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        self.inner.get_realm_role_by_name(realm_id, name).await
    }

    async fn get_client_role_by_name(
        &self,
        realm_id: Uuid,
        client_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        self.inner
            .get_client_role_by_name(realm_id, client_id, name)
            .await
    }
}

#[async_trait]
impl UserProvider for CountingStore {
    async fn create(&self, user: &User) -> StorageResult<()> {
        UserProvider::create(&self.inner, user).await
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<User>> {
        UserProvider::get_by_id(&self.inner, realm_id, id).await
    }

    async fn grant_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        self.check_available()?;
        self.grants.fetch_add(1, Ordering::SeqCst);
        self.inner.grant_role(realm_id, user_id, role_id).await
    }

    async fn revoke_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        self.check_available()?;
        self.revokes.fetch_add(1, Ordering::SeqCst);
        self.inner.revoke_role(realm_id, user_id, role_id).await
    }

    async fn get_roles(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<Vec<Uuid>> {
        self.check_available()?;
        self.inner.get_roles(realm_id, user_id).await
    }

    async fn has_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<bool> {
        self.check_available()?;
        self.inner.has_role(realm_id, user_id, role_id).await
    }
}

/// A realm with one brokered user, a realm role and a client role.
pub struct TestEnv {
    /// Backing store.
    pub store: Arc<CountingStore>,
    /// Broker context for the realm.
    pub ctx: BrokerContext,
    /// Brokered user.
    pub user: User,
    /// Realm role `local-admin`.
    pub realm_role: Role,
    /// Client role `portal.editor`.
    pub client_role: Role,
}

impl TestEnv {
    /// Creates a seeded environment.
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kc_broker=debug")
            .with_test_writer()
            .try_init();

        let store = Arc::new(CountingStore::default());
        let realm_id = Uuid::now_v7();

        let user = User::new(realm_id, "jdoe").with_identity_provider("corp-keycloak");
        UserProvider::create(store.as_ref(), &user).await?;

        let client = Client::new(realm_id, "portal");
        ClientProvider::create(store.as_ref(), &client).await?;

        let realm_role = Role::new_realm_role(realm_id, "local-admin");
        RoleProvider::create(store.as_ref(), &realm_role).await?;
        let client_role = Role::new_client_role(realm_id, client.id, "editor");
        RoleProvider::create(store.as_ref(), &client_role).await?;

        Ok(Self {
            ctx: BrokerContext::new(realm_id, RoleMutator::from_store(store.clone())),
            store,
            user,
            realm_role,
            client_role,
        })
    }

    /// Checks whether the user currently holds a role.
    pub async fn holds(&self, role: &Role) -> anyhow::Result<bool> {
        Ok(self
            .store
            .inner
            .has_role(self.ctx.realm_id(), self.user.id, role.id)
            .await?)
    }
}

/// Claims from an upstream token with realm role `admin` and client role
/// `upstream-app.editor`.
pub fn upstream_claims() -> ClaimSet {
    ClaimSet::from_value(json!({
        "iss": "https://idp.example.com/realms/corp",
        "sub": "4f1c2a9e",
        "realm_access": { "roles": ["admin", "offline_access"] },
        "resource_access": {
            "upstream-app": { "roles": ["editor"] }
        }
    }))
}
