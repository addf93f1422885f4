//! Role domain model.
//!
//! Roles are either realm roles (apply across the realm) or client roles
//! (scoped to one client application). Both are addressed by the same
//! textual reference: `name` for a realm role, `client.name` for a client
//! role. [`RoleRef`] is the parsed form of such a reference.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role stored in the local authorization store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: Uuid,
    /// Role name (unique within realm or client).
    pub name: String,
    /// Role description.
    pub description: Option<String>,
    /// Realm this role belongs to.
    pub realm_id: Uuid,
    /// Owning client's internal ID (None for realm roles).
    pub client_id: Option<Uuid>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new realm role.
    #[must_use]
    pub fn new_realm_role(realm_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            realm_id,
            client_id: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a new client role.
    #[must_use]
    pub fn new_client_role(realm_id: Uuid, client_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::new_realm_role(realm_id, name)
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Checks if this is a realm role.
    #[must_use]
    pub const fn is_realm_role(&self) -> bool {
        self.client_id.is_none()
    }

    /// Checks if this is a client role.
    #[must_use]
    pub const fn is_client_role(&self) -> bool {
        self.client_id.is_some()
    }
}

/// A parsed role reference: an optional scope qualifier plus a bare name.
///
/// `"myclient.admin"` parses to scope `myclient`, name `admin`;
/// `"admin"` parses to no scope, name `admin`. Only the first dot splits,
/// so `"a.b.c"` is scope `a`, name `b.c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleRef {
    /// Scope qualifier (client ID / audience), if any.
    pub scope: Option<String>,
    /// Bare role name.
    pub name: String,
}

impl RoleRef {
    /// Parses a raw role reference.
    ///
    /// No validation is performed: an empty string yields an unscoped
    /// reference with an empty name.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('.') {
            Some((scope, name)) => Self {
                scope: Some(scope.to_string()),
                name: name.to_string(),
            },
            None => Self {
                scope: None,
                name: raw.to_string(),
            },
        }
    }

    /// Creates an unscoped (realm) reference.
    #[must_use]
    pub fn realm(name: impl Into<String>) -> Self {
        Self {
            scope: None,
            name: name.into(),
        }
    }

    /// Creates a client-scoped reference.
    #[must_use]
    pub fn client(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            name: name.into(),
        }
    }

    /// Returns the scope qualifier, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Checks if this reference names a client role.
    #[must_use]
    pub const fn is_client_role(&self) -> bool {
        self.scope.is_some()
    }
}

impl fmt::Display for RoleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{scope}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for RoleRef {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
