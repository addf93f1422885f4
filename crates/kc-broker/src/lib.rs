//! # kc-broker
//!
//! Identity brokering support: mapping claims from tokens issued by external
//! identity providers onto local role mappings.
//!
//! ## Pipeline
//!
//! ```text
//! claims + mapper config + event
//!   -> RoleRef::parse + ClaimSet::resolve
//!   -> has_external_role          (membership)
//!   -> sync::decide               (grant / revoke / no-op)
//!   -> RoleMutator                (store)
//! ```
//!
//! The broker orchestrator dispatches through [`IdentityProviderMapper`];
//! [`ExternalRoleToRoleMapper`] is the built-in role importer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod config;
pub mod error;
pub mod mapper;
pub mod membership;
pub mod mutator;
pub mod role_mapper;
pub mod sync;

pub use claims::ClaimSet;
pub use config::{ConfigProperty, ConfigPropertyType, MapperConfig};
pub use error::{BrokerError, BrokerResult};
pub use mapper::{BrokerContext, IdentityProviderMapper, MapperRegistry};
pub use membership::has_external_role;
pub use mutator::RoleMutator;
pub use role_mapper::ExternalRoleToRoleMapper;
pub use sync::{SyncAction, SyncEvent, SyncMode};
