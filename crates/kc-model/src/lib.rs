//! # kc-model
//!
//! Domain models shared by the storage layer and the identity broker:
//! users, clients, roles, and parsed role references.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod role;
pub mod user;

pub use client::Client;
pub use role::{Role, RoleRef};
pub use user::User;
