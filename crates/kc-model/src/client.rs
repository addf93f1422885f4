//! Client domain model.
//!
//! Clients own client-scoped roles. A client role reference names the
//! client by its public `client_id`, not its internal UUID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client application registered in a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this client belongs to.
    pub realm_id: Uuid,
    /// Public client identifier (OAuth `client_id`).
    pub client_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Whether the client is enabled.
    pub enabled: bool,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client.
    #[must_use]
    pub fn new(realm_id: Uuid, client_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            realm_id,
            client_id: client_id.into(),
            name: None,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
