//! Authorization gate: the per-request pipeline.
//!
//! Order is fixed: tenant, then token, then user. Nothing after a failed
//! step runs, and token validation never touches storage.

use naviera_core::models::tenant::Tenant;
use naviera_core::models::user::{User, UserRole};
use naviera_core::repository::{Lookup, TenantRepository, UserRepository};
use tracing::{debug, instrument};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::provisioner::IdentityProvisioner;
use crate::tenant::TenantResolver;
use crate::token::{IdentityClaims, TokenValidator};

/// The authenticated `(tenant, user)` pair handed to business logic.
///
/// Read-only for the lifetime of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    tenant: Tenant,
    user: User,
}

impl Principal {
    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }
}

/// Whether `onboard` created the user or found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    Created,
    Existing,
}

/// Orchestrates [`TenantResolver`], [`TokenValidator`], and
/// [`IdentityProvisioner`] over any repository implementation.
#[derive(Clone)]
pub struct AuthorizationGate<T: TenantRepository, U: UserRepository> {
    tenants: TenantResolver<T>,
    tokens: TokenValidator,
    provisioner: IdentityProvisioner<U>,
    users: U,
}

impl<T, U> AuthorizationGate<T, U>
where
    T: TenantRepository,
    U: UserRepository + Clone + 'static,
{
    pub fn new(tenant_repo: T, user_repo: U, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self::from_parts(
            TenantResolver::new(tenant_repo),
            TokenValidator::new(config)?,
            user_repo,
        ))
    }

    pub fn from_parts(tenants: TenantResolver<T>, tokens: TokenValidator, users: U) -> Self {
        Self {
            tenants,
            tokens,
            provisioner: IdentityProvisioner::new(users.clone()),
            users,
        }
    }

    /// Admit an already-onboarded caller. Performs no writes.
    ///
    /// Fails with [`AuthError::AccessDenied`] when the identity has no user
    /// in the resolved tenant and [`AuthError::InactiveAccount`] when the
    /// user is deactivated.
    #[instrument(skip_all, fields(tenant_slug = ?tenant_slug))]
    pub async fn authenticate(
        &self,
        tenant_slug: Option<&str>,
        bearer_token: Option<&str>,
    ) -> Result<Principal, AuthError> {
        let (tenant, claims) = self.resolve_and_validate(tenant_slug, bearer_token).await?;

        let user = match self
            .users
            .get_by_external_identity(tenant.id, &claims.subject)
            .await?
        {
            Lookup::Found(user) => user,
            Lookup::NotFound => {
                debug!(tenant_id = %tenant.id, "Identity has no user in tenant");
                return Err(AuthError::AccessDenied);
            }
        };

        if !user.is_active {
            debug!(tenant_id = %tenant.id, user_id = %user.id, "Inactive account");
            return Err(AuthError::InactiveAccount);
        }

        Ok(Principal { tenant, user })
    }

    /// Admit any validly authenticated identity, creating its user in the
    /// resolved tenant on first contact. Idempotent.
    pub async fn onboard(
        &self,
        tenant_slug: Option<&str>,
        bearer_token: Option<&str>,
    ) -> Result<Principal, AuthError> {
        self.onboard_with_status(tenant_slug, bearer_token)
            .await
            .map(|(principal, _)| principal)
    }

    /// [`onboard`](Self::onboard), also reporting whether the user was
    /// created by this call.
    #[instrument(skip_all, fields(tenant_slug = ?tenant_slug))]
    pub async fn onboard_with_status(
        &self,
        tenant_slug: Option<&str>,
        bearer_token: Option<&str>,
    ) -> Result<(Principal, ProvisionStatus), AuthError> {
        let (tenant, claims) = self.resolve_and_validate(tenant_slug, bearer_token).await?;

        let provisioned = self.provisioner.provision(&claims, &tenant).await?;
        let status = if provisioned.was_created() {
            ProvisionStatus::Created
        } else {
            ProvisionStatus::Existing
        };
        let user = provisioned.into_user();

        Ok((Principal { tenant, user }, status))
    }

    /// Require the principal's role to be one of `allowed`.
    pub fn authorize_role(
        &self,
        principal: &Principal,
        allowed: &[UserRole],
    ) -> Result<(), AuthError> {
        if allowed.contains(&principal.role()) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }

    async fn resolve_and_validate(
        &self,
        tenant_slug: Option<&str>,
        bearer_token: Option<&str>,
    ) -> Result<(Tenant, IdentityClaims), AuthError> {
        let tenant = self.tenants.resolve(tenant_slug).await?;
        let token = bearer_token.ok_or(AuthError::InvalidCredentials)?;
        let claims = self.tokens.validate(token)?;
        Ok((tenant, claims))
    }
}
