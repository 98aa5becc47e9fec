//! Shared application state.

use std::sync::Arc;

use naviera_auth::{AuthConfig, AuthError, AuthorizationGate};
use naviera_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type Gate = AuthorizationGate<SurrealTenantRepository<Any>, SurrealUserRepository<Any>>;

/// Handles shared by every request. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<Gate>,
    pub tenants: SurrealTenantRepository<Any>,
    pub users: SurrealUserRepository<Any>,
}

impl AppState {
    /// Build the state over a connected database. Fails only on a bad
    /// trust configuration.
    pub fn new(db: Surreal<Any>, auth: &AuthConfig) -> Result<Self, AuthError> {
        let tenants = SurrealTenantRepository::new(db.clone());
        let users = SurrealUserRepository::new(db);
        let gate = AuthorizationGate::new(tenants.clone(), users.clone(), auth)?;

        Ok(Self {
            gate: Arc::new(gate),
            tenants,
            users,
        })
    }
}
