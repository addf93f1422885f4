//! # kc-storage
//!
//! Storage abstraction traits consumed by the identity broker.
//!
//! ## Provider Traits
//!
//! - [`UserProvider`] - users and their direct role mappings
//! - [`ClientProvider`] - client lookup by public `client_id`
//! - [`RoleProvider`] - realm and client role lookup
//!
//! [`InMemoryStore`] implements all three over process-local maps.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod memory;
pub mod role;
pub mod user;

pub use client::ClientProvider;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use role::RoleProvider;
pub use user::UserProvider;
