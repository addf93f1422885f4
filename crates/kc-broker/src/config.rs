//! Identity provider mapper configuration.
//!
//! A [`MapperConfig`] is one configured mapper instance as stored by the
//! admin layer: its type, the identity provider it is attached to, its sync
//! mode, and free-form key/value settings. [`ConfigProperty`] describes the
//! settings a mapper type accepts.
//!
//! In the admin representation the sync mode lives in the settings map
//! under `syncMode`. A top-level `syncMode` is also read; the map entry
//! wins when both are present.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sync::{SyncMode, UnknownSyncMode};

/// Config key for the external role reference.
pub const EXTERNAL_ROLE: &str = "external.role";

/// Config key for the local role reference.
pub const ROLE: &str = "role";

/// Config key for the sync mode.
pub const SYNC_MODE: &str = "syncMode";

// ============================================================================
// Mapper Instance
// ============================================================================

/// Configuration of a single identity provider mapper instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapperRepresentation", into = "MapperRepresentation")]
pub struct MapperConfig {
    /// Mapper ID.
    pub id: Uuid,

    /// Mapper name.
    pub name: String,

    /// Alias of the identity provider this mapper is attached to.
    pub identity_provider_alias: String,

    /// Mapper type (matches [`IdentityProviderMapper::id`](crate::mapper::IdentityProviderMapper::id)).
    pub mapper_type: String,

    /// Synchronization mode.
    pub sync_mode: SyncMode,

    /// Mapper-specific configuration, without the sync mode entry.
    pub config: HashMap<String, String>,
}

/// Admin wire shape of [`MapperConfig`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapperRepresentation {
    #[serde(default = "Uuid::now_v7")]
    id: Uuid,
    name: String,
    #[serde(default)]
    identity_provider_alias: String,
    identity_provider_mapper: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sync_mode: Option<SyncMode>,
    #[serde(default)]
    config: HashMap<String, String>,
}

impl TryFrom<MapperRepresentation> for MapperConfig {
    type Error = UnknownSyncMode;

    fn try_from(rep: MapperRepresentation) -> Result<Self, Self::Error> {
        let mut config = rep.config;
        let sync_mode = match config.remove(SYNC_MODE) {
            Some(raw) => raw.parse()?,
            None => rep.sync_mode.unwrap_or_default(),
        };

        Ok(Self {
            id: rep.id,
            name: rep.name,
            identity_provider_alias: rep.identity_provider_alias,
            mapper_type: rep.identity_provider_mapper,
            sync_mode,
            config,
        })
    }
}

impl From<MapperConfig> for MapperRepresentation {
    fn from(mapper: MapperConfig) -> Self {
        let mut config = mapper.config;
        config.insert(SYNC_MODE.to_string(), mapper.sync_mode.to_string());

        Self {
            id: mapper.id,
            name: mapper.name,
            identity_provider_alias: mapper.identity_provider_alias,
            identity_provider_mapper: mapper.mapper_type,
            sync_mode: None,
            config,
        }
    }
}

impl MapperConfig {
    /// Creates a new mapper config.
    #[must_use]
    pub fn new(name: impl Into<String>, mapper_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            identity_provider_alias: String::new(),
            mapper_type: mapper_type.into(),
            sync_mode: SyncMode::default(),
            config: HashMap::new(),
        }
    }

    /// Sets the identity provider alias.
    #[must_use]
    pub fn with_identity_provider(mut self, alias: impl Into<String>) -> Self {
        self.identity_provider_alias = alias.into();
        self
    }

    /// Sets the sync mode.
    #[must_use]
    pub const fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }

    /// Adds a config value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a config value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Raw external role reference (`external.role`).
    #[must_use]
    pub fn external_role(&self) -> Option<&str> {
        self.get(EXTERNAL_ROLE)
    }

    /// Raw local role reference (`role`).
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.get(ROLE)
    }
}

// ============================================================================
// Config Schema
// ============================================================================

/// Kind of value a config property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Free text.
    String,
    /// Reference to a local realm or client role.
    Role,
}

/// Describes one setting a mapper type accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    #[serde(rename = "type")]
    pub property_type: ConfigPropertyType,
}

impl ConfigProperty {
    /// Creates a property of the given type.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        property_type: ConfigPropertyType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type,
        }
    }

    /// Creates a free-text property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, ConfigPropertyType::String)
    }

    /// Creates a role-reference property.
    #[must_use]
    pub fn role(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, ConfigPropertyType::Role)
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

}
