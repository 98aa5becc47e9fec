//! SurrealDB repository implementations.

use surrealdb_types::SurrealValue;

mod tenant;
mod user;

pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}
