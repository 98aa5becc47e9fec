//! Just-in-time user provisioning.
//!
//! `get_or_create` must be idempotent under concurrent first contact from
//! the same identity. There is no lock: two callers may both miss the
//! initial lookup and both attempt the insert. The storage engine's
//! `(tenant_id, external_identity_id)` unique index lets exactly one of
//! them win; the loser sees [`Insert::Conflict`], re-reads, and returns
//! the winner's row.

use naviera_core::models::tenant::Tenant;
use naviera_core::models::user::{CreateUser, User};
use naviera_core::repository::{Insert, Lookup, UserRepository};
use tracing::{info, warn};

use crate::error::AuthError;
use crate::token::IdentityClaims;

/// Result of a get-or-create call.
#[derive(Debug, Clone, PartialEq)]
pub enum Provisioned {
    /// The user already existed (fast path, or lost the insert race).
    Existing(User),
    /// This call inserted the user.
    Created(User),
}

impl Provisioned {
    pub fn into_user(self) -> User {
        match self {
            Provisioned::Existing(user) | Provisioned::Created(user) => user,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Provisioned::Created(_))
    }
}

#[derive(Clone)]
pub struct IdentityProvisioner<U: UserRepository> {
    users: U,
}

impl<U> IdentityProvisioner<U>
where
    U: UserRepository + Clone + 'static,
{
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Return the user bound to `claims.subject` in `tenant`, creating an
    /// active `customer` on first contact.
    pub async fn get_or_create(
        &self,
        claims: &IdentityClaims,
        tenant: &Tenant,
    ) -> Result<User, AuthError> {
        self.provision(claims, tenant).await.map(Provisioned::into_user)
    }

    /// Like [`get_or_create`](Self::get_or_create), but reports whether
    /// this call performed the insert.
    pub async fn provision(
        &self,
        claims: &IdentityClaims,
        tenant: &Tenant,
    ) -> Result<Provisioned, AuthError> {
        if let Lookup::Found(user) = self
            .users
            .get_by_external_identity(tenant.id, &claims.subject)
            .await?
        {
            return Ok(Provisioned::Existing(user));
        }

        let input = CreateUser::customer(tenant.id, claims.subject.clone(), claims.email.clone());

        // The insert runs as its own task: if the caller is dropped
        // mid-request, a write that already started still commits.
        let users = self.users.clone();
        let outcome = tokio::spawn(async move { users.insert(input).await })
            .await
            .map_err(|e| AuthError::ProvisioningFailed(format!("insert task failed: {e}")))??;

        match outcome {
            Insert::Created(user) => {
                info!(
                    tenant_id = %tenant.id,
                    user_id = %user.id,
                    "Provisioned new user"
                );
                Ok(Provisioned::Created(user))
            }
            Insert::Conflict => self.recover_from_conflict(claims, tenant).await,
        }
    }

    async fn recover_from_conflict(
        &self,
        claims: &IdentityClaims,
        tenant: &Tenant,
    ) -> Result<Provisioned, AuthError> {
        match self
            .users
            .get_by_external_identity(tenant.id, &claims.subject)
            .await?
        {
            Lookup::Found(user) => {
                info!(
                    tenant_id = %tenant.id,
                    user_id = %user.id,
                    "Concurrent provisioning resolved to existing user"
                );
                Ok(Provisioned::Existing(user))
            }
            Lookup::NotFound => self.explain_unmatched_conflict(claims, tenant).await,
        }
    }

    /// The conflict was not on this identity. Tell an email held by another
    /// subject apart from a conflict that a retry may clear.
    async fn explain_unmatched_conflict(
        &self,
        claims: &IdentityClaims,
        tenant: &Tenant,
    ) -> Result<Provisioned, AuthError> {
        match self.users.get_by_email(tenant.id, &claims.email).await? {
            Lookup::Found(holder) => {
                warn!(
                    tenant_id = %tenant.id,
                    holder_id = %holder.id,
                    "Email already bound to another identity in tenant"
                );
                Err(AuthError::ProvisioningFailed(
                    "email already bound to another identity in this tenant".into(),
                ))
            }
            Lookup::NotFound => {
                warn!(
                    tenant_id = %tenant.id,
                    "Insert conflicted but no user exists for this identity"
                );
                Err(AuthError::ProvisioningFailed(
                    "uniqueness conflict without a matching identity".into(),
                ))
            }
        }
    }
}
