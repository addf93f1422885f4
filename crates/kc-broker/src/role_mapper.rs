//! External role to local role mapper.
//!
//! Looks for an external role in a Keycloak access token issued by the
//! upstream provider. If the role is present, the user is granted the
//! configured local realm or client role.

use async_trait::async_trait;
use kc_model::User;

use crate::claims::ClaimSet;
use crate::config::{ConfigProperty, MapperConfig, EXTERNAL_ROLE, ROLE};
use crate::error::{BrokerError, BrokerResult};
use crate::mapper::{BrokerContext, IdentityProviderMapper, KEYCLOAK_OIDC_PROVIDER};
use crate::membership::has_external_role;
use crate::sync::{decide, SyncAction, SyncEvent, SyncMode};

const COMPATIBLE_PROVIDERS: &[&str] = &[KEYCLOAK_OIDC_PROVIDER];

/// Grants a local role when the upstream token carries an external role.
#[derive(Debug, Clone)]
pub struct ExternalRoleToRoleMapper {
    properties: Vec<ConfigProperty>,
}

impl ExternalRoleToRoleMapper {
    /// Mapper type identifier.
    pub const PROVIDER_ID: &'static str = "keycloak-oidc-role-to-role-idp-mapper";

    /// Creates the mapper and its configuration schema.
    #[must_use]
    pub fn new() -> Self {
        let properties = vec![
            ConfigProperty::string(EXTERNAL_ROLE, "External role").with_help(
                "External role to check for. To reference a client role the syntax is \
                 clientname.clientrole, i.e. myclient.myrole",
            ),
            ConfigProperty::role(ROLE, "Role").with_help(
                "Role to grant to user if external role is present. To reference a client \
                 role the syntax is clientname.clientrole, i.e. myclient.myrole",
            ),
        ];
        Self { properties }
    }

    /// Evaluates the configured external role against the claims.
    ///
    /// A mapper without an `external.role` setting never reports membership.
    fn is_member(config: &MapperConfig, claims: &ClaimSet) -> bool {
        match config.external_role() {
            Some(external) if !external.is_empty() => has_external_role(claims, external),
            _ => {
                tracing::debug!(mapper = %config.name, "No external role configured");
                false
            }
        }
    }

    /// Resolves the role (if needed) and applies the decided action.
    ///
    /// The local role is looked up before any mutation so that a missing
    /// role leaves mappings untouched.
    async fn sync(
        &self,
        event: SyncEvent,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()> {
        let is_member = Self::is_member(config, claims);
        let action = decide(event, is_member);
        tracing::debug!(
            mapper = %config.name,
            user = %user.username,
            ?event,
            is_member,
            ?action,
            "Role mapper decision"
        );
        if action == SyncAction::NoOp {
            return Ok(());
        }

        let raw = config
            .role()
            .ok_or_else(|| BrokerError::config(format!("mapper '{}' has no '{ROLE}'", config.name)))?;
        let role = ctx.roles().resolve_local_role(ctx.realm_id(), raw).await?;
        ctx.roles().apply(action, user, &role).await?;
        Ok(())
    }
}

impl Default for ExternalRoleToRoleMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProviderMapper for ExternalRoleToRoleMapper {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_category(&self) -> &'static str {
        "Role Importer"
    }

    fn display_type(&self) -> &'static str {
        "External Role to Role"
    }

    fn help_text(&self) -> &'static str {
        "Looks for an external role in a keycloak access token. If external role exists, \
         grant the user the specified realm or client role."
    }

    fn compatible_providers(&self) -> &[&'static str] {
        COMPATIBLE_PROVIDERS
    }

    fn config_properties(&self) -> &[ConfigProperty] {
        &self.properties
    }

    // Every declared mode is accepted. Whether some mode should be excluded
    // is unresolved; revisit if a mode needs different handling.
    fn supported_sync_modes(&self) -> &[SyncMode] {
        SyncMode::ALL
    }

    async fn on_first_login(
        &self,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()> {
        self.sync(SyncEvent::FirstLogin, ctx, user, config, claims)
            .await
    }

    async fn on_resync(
        &self,
        ctx: &BrokerContext,
        user: &User,
        config: &MapperConfig,
        claims: &ClaimSet,
    ) -> BrokerResult<()> {
        self.sync(SyncEvent::Resync, ctx, user, config, claims).await
    }

    /// Never updates mappings. The legacy path historically did nothing,
    /// and deployed realms depend on that.
    async fn on_legacy_resync(
        &self,
        _ctx: &BrokerContext,
        _user: &User,
        _config: &MapperConfig,
        _claims: &ClaimSet,
    ) -> BrokerResult<()> {
        Ok(())
    }
}
