//! Brokered role synchronization scenarios.

use kc_broker::config::{EXTERNAL_ROLE, ROLE};
use kc_broker::{
    BrokerError, ClaimSet, ExternalRoleToRoleMapper, IdentityProviderMapper, MapperConfig,
    MapperRegistry, SyncMode,
};

use crate::common::{upstream_claims, TestEnv};

fn mapper_config(external: &str, local: &str, mode: SyncMode) -> MapperConfig {
    MapperConfig::new("role import", ExternalRoleToRoleMapper::PROVIDER_ID)
        .with_identity_provider("corp-keycloak")
        .with_sync_mode(mode)
        .with_config(EXTERNAL_ROLE, external)
        .with_config(ROLE, local)
}

#[tokio::test]
async fn first_login_with_membership_grants_role() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("admin", "local-admin", SyncMode::Import);

    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;

    assert!(env.holds(&env.realm_role).await?);
    assert_eq!(env.store.grants(), 1);
    assert_eq!(env.store.revokes(), 0);
    Ok(())
}

#[tokio::test]
async fn first_login_without_membership_does_nothing() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("auditor", "local-admin", SyncMode::Import);

    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;

    assert!(!env.holds(&env.realm_role).await?);
    assert_eq!(env.store.grants(), 0);
    assert_eq!(env.store.revokes(), 0);
    Ok(())
}

#[tokio::test]
async fn client_scoped_claim_grants_client_role() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();

    let config = mapper_config("upstream-app.editor", "portal.editor", SyncMode::Force);
    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;
    assert!(env.holds(&env.client_role).await?);

    // same role name, wrong audience
    let config = mapper_config("other-app.editor", "local-admin", SyncMode::Force);
    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;
    assert!(!env.holds(&env.realm_role).await?);
    Ok(())
}

#[tokio::test]
async fn resync_revokes_exactly_once_when_membership_lost() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("admin", "local-admin", SyncMode::Force);

    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;
    assert!(env.holds(&env.realm_role).await?);

    let demoted = ClaimSet::from_value(serde_json::json!({
        "realm_access": { "roles": ["offline_access"] }
    }));
    mapper
        .on_resync(&env.ctx, &env.user, &config, &demoted)
        .await?;
    mapper
        .on_resync(&env.ctx, &env.user, &config, &demoted)
        .await?;

    assert!(!env.holds(&env.realm_role).await?);
    assert_eq!(env.store.revokes(), 1);
    Ok(())
}

#[tokio::test]
async fn repeated_resync_grants_once() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("admin", "local-admin", SyncMode::Force);

    for _ in 0..3 {
        mapper
            .on_resync(&env.ctx, &env.user, &config, &upstream_claims())
            .await?;
    }

    assert!(env.holds(&env.realm_role).await?);
    assert_eq!(env.store.grants(), 1);
    assert_eq!(env.store.revokes(), 0);
    Ok(())
}

#[tokio::test]
async fn legacy_resync_never_mutates() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("admin", "local-admin", SyncMode::LegacyImport);

    mapper
        .on_legacy_resync(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;
    mapper
        .on_legacy_resync(&env.ctx, &env.user, &config, &ClaimSet::default())
        .await?;

    // an unresolvable local role is not even looked up
    let broken = mapper_config("admin", "no-such-role", SyncMode::LegacyImport);
    mapper
        .on_legacy_resync(&env.ctx, &env.user, &broken, &upstream_claims())
        .await?;

    assert_eq!(env.store.grants(), 0);
    assert_eq!(env.store.revokes(), 0);
    Ok(())
}

#[tokio::test]
async fn unknown_local_role_fails_before_mutation() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();

    for local in ["no-such-role", "portal.no-such-role", "no-such-client.editor"] {
        let config = mapper_config("admin", local, SyncMode::Force);

        let err = mapper
            .on_resync(&env.ctx, &env.user, &config, &upstream_claims())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::RoleNotFound(ref r) if r == local));

        let err = mapper
            .on_resync(&env.ctx, &env.user, &config, &ClaimSet::default())
            .await
            .unwrap_err();
        assert!(err.is_role_not_found());
    }

    assert_eq!(env.store.grants(), 0);
    assert_eq!(env.store.revokes(), 0);
    Ok(())
}

#[tokio::test]
async fn store_failures_propagate() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mapper = ExternalRoleToRoleMapper::new();
    let config = mapper_config("admin", "local-admin", SyncMode::Force);

    env.store.set_unavailable(true);
    let err = mapper
        .on_resync(&env.ctx, &env.user, &config, &upstream_claims())
        .await
        .unwrap_err();
    assert!(err.is_storage_error());

    env.store.set_unavailable(false);
    assert!(!env.holds(&env.realm_role).await?);
    Ok(())
}

#[tokio::test]
async fn registry_dispatch_accepts_every_sync_mode() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let registry = MapperRegistry::with_builtin();

    for mode in SyncMode::ALL {
        let config = mapper_config("admin", "local-admin", *mode);
        let mapper = registry
            .for_config(&config)
            .ok_or_else(|| anyhow::anyhow!("mapper type not registered"))?;

        assert!(mapper.supports_sync_mode(config.sync_mode));
        mapper
            .on_resync(&env.ctx, &env.user, &config, &upstream_claims())
            .await?;
    }

    assert!(env.holds(&env.realm_role).await?);
    assert_eq!(env.store.grants(), 1);
    Ok(())
}

#[tokio::test]
async fn mapper_from_admin_representation() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let registry = MapperRegistry::with_builtin();

    let config: MapperConfig = serde_json::from_str(
        r#"{
            "name": "portal editors",
            "identityProviderAlias": "corp-keycloak",
            "identityProviderMapper": "keycloak-oidc-role-to-role-idp-mapper",
            "config": {
                "syncMode": "FORCE",
                "external.role": "upstream-app.editor",
                "role": "portal.editor"
            }
        }"#,
    )?;
    assert_eq!(config.sync_mode, SyncMode::Force);
    assert_eq!(config.get("syncMode"), None);
    let mapper = registry
        .for_config(&config)
        .ok_or_else(|| anyhow::anyhow!("mapper type not registered"))?;

    mapper
        .on_first_login(&env.ctx, &env.user, &config, &upstream_claims())
        .await?;
    assert!(env.holds(&env.client_role).await?);
    Ok(())
}
