//! User domain model.
//!
//! Only the identity fields needed to address a user's role mappings are
//! modeled; profile and credential data live with their own providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A local user account, possibly linked to a brokered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this user belongs to.
    pub realm_id: Uuid,
    /// Unique username within the realm.
    pub username: String,
    /// Whether the user account is enabled.
    pub enabled: bool,
    /// Alias of the identity provider this account was brokered from.
    pub identity_provider: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given username.
    #[must_use]
    pub fn new(realm_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            realm_id,
            username: username.into(),
            enabled: true,
            identity_provider: None,
            created_at: Utc::now(),
        }
    }

    /// Links the user to the identity provider it was brokered from.
    #[must_use]
    pub fn with_identity_provider(mut self, alias: impl Into<String>) -> Self {
        self.identity_provider = Some(alias.into());
        self
    }

    /// Sets whether the user is enabled.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Checks if this user came from an identity broker.
    #[must_use]
    pub const fn is_brokered(&self) -> bool {
        self.identity_provider.is_some()
    }
}
