//! Tenant resolution.

use naviera_core::models::tenant::Tenant;
use naviera_core::repository::{Lookup, TenantRepository};
use tracing::debug;

use crate::error::AuthError;

/// Maps the tenant slug carried by a request to a tenant record.
///
/// Runs before token validation so every later check is tenant scoped.
#[derive(Clone)]
pub struct TenantResolver<T: TenantRepository> {
    tenants: T,
}

impl<T: TenantRepository> TenantResolver<T> {
    pub fn new(tenants: T) -> Self {
        Self { tenants }
    }

    /// Resolve a slug. An absent or blank slug is
    /// [`AuthError::MissingTenantContext`]; an unknown one is
    /// [`AuthError::TenantNotFound`].
    pub async fn resolve(&self, tenant_slug: Option<&str>) -> Result<Tenant, AuthError> {
        let slug = tenant_slug
            .filter(|s| !s.trim().is_empty())
            .ok_or(AuthError::MissingTenantContext)?;

        match self.tenants.get_by_slug(slug).await? {
            Lookup::Found(tenant) => Ok(tenant),
            Lookup::NotFound => {
                debug!(tenant_slug = slug, "Unknown tenant slug");
                Err(AuthError::TenantNotFound)
            }
        }
    }
}
