//! Identity provider mapper SPI.
//!
//! Mappers run whenever a brokered identity logs in:
//! - [`IdentityProviderMapper::on_first_login`] when the identity is first
//!   linked to a local account
//! - [`IdentityProviderMapper::on_resync`] on later logins, when the
//!   caller's sync mode asks for a re-sync
//! - [`IdentityProviderMapper::on_legacy_resync`] on the legacy update path
//!
//! Each mapper type is a struct implementing the trait. The
//! [`MapperRegistry`] looks mapper types up by the `mapper_type` of a
//! [`MapperConfig`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use kc_model::User;
use uuid::Uuid;

use crate::claims::ClaimSet;
use crate::config::{ConfigProperty, MapperConfig};
use crate::error::BrokerResult;
use crate::mutator::RoleMutator;
use crate::role_mapper::ExternalRoleToRoleMapper;
use crate::sync::SyncMode;

/// Provider ID of the Keycloak OIDC identity provider.
pub const KEYCLOAK_OIDC_PROVIDER: &str = "keycloak-oidc";

// ============================================================================
// Broker Context
// ============================================================================

/// Per-call state handed to a mapper.
#[derive(Debug, Clone)]
pub struct BrokerContext {
    realm_id: Uuid,
    roles: RoleMutator,
}

impl BrokerContext {
    /// Creates a context for one synchronization call in a realm.
    #[must_use]
    pub const fn new(realm_id: Uuid, roles: RoleMutator) -> Self {
        Self { realm_id, roles }
    }

    /// Returns the realm being synchronized.
    #[must_use]
    pub const fn realm_id(&self) -> Uuid {
        self.realm_id
    }

    /// Returns the role mutator.
    #[must_use]
    pub const fn roles(&self) -> &RoleMutator {
        &self.roles
    }
}

// ============================================================================
// Mapper Trait
// ============================================================================

/// Capability interface shared by all identity provider mapper types.
#[async_trait]
pub trait IdentityProviderMapper: Send + Sync + Debug {
    /// Returns the mapper type identifier.
    fn id(&self) -> &'static str;

    /// Returns the category shown in the admin console.
    fn display_category(&self) -> &'static str;

    /// Returns the display name for this mapper type.
    fn display_type(&self) -> &'static str;

    /// Returns help text describing this mapper.
    fn help_text(&self) -> &'static str;

    /// Returns the identity provider types this mapper can be attached to.
    fn compatible_providers(&self) -> &[&'static str];

    /// Returns the settings this mapper accepts.
    fn config_properties(&self) -> &[ConfigProperty];

    /// Returns the sync modes this mapper declares support for.
    fn supported_sync_modes(&self) -> &[SyncMode];

    /// Checks if this mapper supports a sync mode.
    fn supports_sync_mode(&self, mode: SyncMode) -> bool {
        self.supported_sync_modes().contains(&mode)
    }

    /// Checks if this mapper can be attached to a provider type.
    fn is_compatible_with(&self, provider_type: &str) -> bool {
        self.compatible_providers()
            .iter()
            .any(|p| *p == "*" || *p == provider_type)
    }

    /// Called once when a brokered identity is linked to a new local account.
    async fn on_first_login(
        &self,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()>;

    /// Called on later logins or periodic re-syncs.
    async fn on_resync(
        &self,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()>;

    /// Called on the legacy update path.
    async fn on_legacy_resync(
        &self,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()>;
}

// ============================================================================
// Mapper Registry
// ============================================================================

/// Registry of mapper types keyed by [`IdentityProviderMapper::id`].
#[derive(Debug, Default, Clone)]
pub struct MapperRegistry {
    mappers: HashMap<&'static str, Arc<dyn IdentityProviderMapper>>,
}

impl MapperRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in mapper types registered.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ExternalRoleToRoleMapper::new()));
        registry
    }

    /// Registers a mapper type, replacing any with the same ID.
    pub fn register(&mut self, mapper: Arc<dyn IdentityProviderMapper>) {
        tracing::debug!(mapper = mapper.id(), "Registering identity provider mapper");
        self.mappers.insert(mapper.id(), mapper);
    }

    /// Gets a mapper type by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn IdentityProviderMapper>> {
        self.mappers.get(id).cloned()
    }

    /// Gets the mapper type a configured mapper instance refers to.
    #[must_use]
    pub fn for_config(&self, config: &MapperConfig) -> Option<Arc<dyn IdentityProviderMapper>> {
        self.get(&config.mapper_type)
    }

    /// Lists the mapper types that can be attached to a provider type.
    #[must_use]
    pub fn compatible_with(&self, provider_type: &str) -> Vec<Arc<dyn IdentityProviderMapper>> {
        let mut mappers: Vec<_> = self
            .mappers
            .values()
            .filter(|m| m.is_compatible_with(provider_type))
            .cloned()
            .collect();
        mappers.sort_by_key(|m| m.id());
        mappers
    }

    /// Lists all registered mapper IDs.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.mappers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
