//! Domain models for Naviera.
//!
//! A tenant owns its users, but never holds a collection of them:
//! users are always fetched through a tenant-scoped repository query.

pub mod tenant;
pub mod user;
