//! Synchronization policy for brokered role mappings.
//!
//! The broker fires one of three events at a mapper. Whether a given
//! [`SyncMode`] leads to a re-sync at all is decided by the caller; this
//! module only maps an event plus a membership decision to an action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Sync Modes
// ============================================================================

/// Synchronization mode of an identity provider mapper.
///
/// New modes may be added; callers must not assume this set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum SyncMode {
    /// Mappings are applied only when the user is first imported.
    #[default]
    Import,

    /// Mappings are re-applied on every login.
    Force,

    /// Legacy behavior kept for mappers configured before sync modes existed.
    #[serde(alias = "LEGACY")]
    LegacyImport,
}

impl SyncMode {
    /// Every declared sync mode.
    pub const ALL: &'static [Self] = &[Self::Import, Self::Force, Self::LegacyImport];

    /// Returns the configuration value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "IMPORT",
            Self::Force => "FORCE",
            Self::LegacyImport => "LEGACY_IMPORT",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sync mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sync mode: {0}")]
pub struct UnknownSyncMode(pub String);

impl FromStr for SyncMode {
    type Err = UnknownSyncMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IMPORT" => Ok(Self::Import),
            "FORCE" => Ok(Self::Force),
            "LEGACY_IMPORT" | "LEGACY" => Ok(Self::LegacyImport),
            _ => Err(UnknownSyncMode(s.to_string())),
        }
    }
}

// ============================================================================
// Events and Actions
// ============================================================================

/// Call site that triggered a synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncEvent {
    /// A brokered identity was linked to a new local account.
    FirstLogin,
    /// A later login or periodic re-sync.
    Resync,
    /// The legacy update path.
    LegacyResync,
}

/// What to do with the local role after evaluating membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    /// Ensure the user holds the role.
    Grant,
    /// Ensure the user does not hold the role.
    Revoke,
    /// Leave role mappings untouched.
    NoOp,
}

/// Maps an event and a membership decision to an action.
///
/// - First login grants on membership and otherwise does nothing: a new
///   account holds no mapping to remove.
/// - Re-sync grants on membership and revokes otherwise.
/// - The legacy path never updated mappings and stays a no-op.
#[must_use]
pub const fn decide(event: SyncEvent, is_member: bool) -> SyncAction {
    match (event, is_member) {
        (SyncEvent::FirstLogin | SyncEvent::Resync, true) => SyncAction::Grant,
        (SyncEvent::Resync, false) => SyncAction::Revoke,
        (SyncEvent::FirstLogin, false) | (SyncEvent::LegacyResync, _) => SyncAction::NoOp,
    }
}
