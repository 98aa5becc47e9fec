//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. User operations require a
//! `tenant_id` parameter to enforce data isolation.
//!
//! A missing row is not an error: lookups return [`Lookup::NotFound`]
//! and inserts rejected by a uniqueness constraint return
//! [`Insert::Conflict`]. Only genuine storage failures surface as `Err`.

use uuid::Uuid;

use crate::error::NavieraResult;
use crate::models::{
    tenant::{CreateTenant, Tenant},
    user::{CreateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Outcome of a lookup by key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Outcome of an insert guarded by uniqueness constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum Insert<T> {
    Created(T),
    /// A row with the same unique key already exists.
    Conflict,
}

// ---------------------------------------------------------------------------
// Tenant (global scope)
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    /// Out-of-band creation (seeding, administration).
    fn create(&self, input: CreateTenant) -> impl Future<Output = NavieraResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = NavieraResult<Lookup<Tenant>>> + Send;
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = NavieraResult<Lookup<Tenant>>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = NavieraResult<PaginatedResult<Tenant>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Insert a new user. Violating either the
    /// `(external_identity_id, tenant_id)` or the `(email, tenant_id)`
    /// uniqueness constraint yields [`Insert::Conflict`].
    fn insert(&self, input: CreateUser) -> impl Future<Output = NavieraResult<Insert<User>>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = NavieraResult<Lookup<User>>> + Send;
    fn get_by_external_identity(
        &self,
        tenant_id: Uuid,
        external_identity_id: &str,
    ) -> impl Future<Output = NavieraResult<Lookup<User>>> + Send;
    fn get_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> impl Future<Output = NavieraResult<Lookup<User>>> + Send;
    /// Administrative toggle of `is_active`.
    fn set_active(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> impl Future<Output = NavieraResult<Lookup<User>>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NavieraResult<PaginatedResult<User>>> + Send;
}
