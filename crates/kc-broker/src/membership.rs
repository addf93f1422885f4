//! External role membership evaluation.
//!
//! Decides whether a token asserts membership in an external role. Realm
//! roles are read from `realm_access.roles`, client roles from
//! `resource_access.<client>.roles`.

use kc_model::RoleRef;
use serde_json::Value;

use crate::claims::{client_roles_claim, ClaimSet, REALM_ROLES_CLAIM};

/// Returns the claim path that carries the given role reference.
#[must_use]
pub fn claim_path_for(role: &RoleRef) -> String {
    match role.scope() {
        Some(audience) => client_roles_claim(audience),
        None => REALM_ROLES_CLAIM.to_string(),
    }
}

/// Checks whether the claims assert membership in `external_role`.
///
/// `external_role` is a raw `client.role` or `role` reference. A reference
/// with an empty role name never matches. Any claim shape that is not a
/// string, number, or list of those yields `false`.
#[must_use]
pub fn has_external_role(claims: &ClaimSet, external_role: &str) -> bool {
    let role = RoleRef::parse(external_role);
    let path = claim_path_for(&role);
    let matched = !role.name.is_empty()
        && claims
            .resolve(&path)
            .is_some_and(|value| value_matches(&role.name, value));

    tracing::debug!(
        external_role,
        claim = %path,
        matched,
        "Evaluated external role membership"
    );
    matched
}

/// Compares a claim value against an expected role name.
///
/// Lists match if any element matches. Strings compare exactly. Numbers
/// compare by their JSON text, so `7` matches `"7"` but not `"7.0"`, and
/// `2.0` matches `"2.0"` only.
#[must_use]
pub fn value_matches(expected: &str, value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| scalar_matches(expected, item)),
        other => scalar_matches(expected, other),
    }
}

fn scalar_matches(expected: &str, value: &Value) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        _ => false,
    }
}
