//! Claim sets taken from validated external tokens.
//!
//! A [`ClaimSet`] is the decoded payload of an access token that the broker
//! has already verified. Claims are addressed by dot-delimited paths such as
//! `realm_access.roles`; a path that cannot be followed resolves to `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim path holding realm-level roles.
pub const REALM_ROLES_CLAIM: &str = "realm_access.roles";

/// Top-level claim holding per-audience role lists.
pub const RESOURCE_ACCESS_CLAIM: &str = "resource_access";

/// Immutable view over a decoded token payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Creates a claim set from a JSON object.
    #[must_use]
    pub const fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Creates a claim set from any JSON value.
    ///
    /// A payload that is not an object carries no claims.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(claims) => Self(claims),
            _ => Self::default(),
        }
    }

    /// Parses a claim set from JSON text.
    ///
    /// ## Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Gets a top-level claim.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Resolves a dot-delimited claim path.
    ///
    /// Descends one segment at a time. Returns `None` when a segment is
    /// missing or an intermediate value is not an object.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next().filter(|s| !s.is_empty())?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the number of top-level claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the claim set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

impl From<Value> for ClaimSet {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Builds the claim path for a client's role list.
#[must_use]
pub fn client_roles_claim(audience: &str) -> String {
    format!("{RESOURCE_ACCESS_CLAIM}.{audience}.roles")
}
