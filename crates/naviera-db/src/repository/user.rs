//! SurrealDB implementation of [`UserRepository`].
//!
//! Inserts rely on the `(tenant_id, external_identity_id)` and
//! `(tenant_id, email)` unique indexes. A write rejected by either index
//! (or losing an optimistic commit race on them) is reported as
//! [`Insert::Conflict`] rather than as an error.

use chrono::{DateTime, Utc};
use naviera_core::error::NavieraResult;
use naviera_core::models::user::{CreateUser, User, UserRole};
use naviera_core::repository::{Insert, Lookup, PaginatedResult, Pagination, UserRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::CountRow;
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    tenant_id: String,
    external_identity_id: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    tenant_id: String,
    external_identity_id: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<UserRole, DbError> {
    s.parse::<UserRole>()
        .map_err(|e| DbError::Decode(e.to_string()))
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            external_identity_id: self.external_identity_id,
            email: self.email,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        Ok(User {
            id: parse_uuid(&self.record_id, "user")?,
            external_identity_id: self.external_identity_id,
            email: self.email,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_one(
        &self,
        tenant_id: Uuid,
        field: &'static str,
        value: &str,
    ) -> NavieraResult<Lookup<User>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM user \
             WHERE tenant_id = $tenant_id AND {field} = $value"
        );

        let mut result = self
            .db
            .query(query)
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("value", value.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Lookup::Found(row.try_into_user()?)),
            None => Ok(Lookup::NotFound),
        }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn insert(&self, input: CreateUser) -> NavieraResult<Insert<User>> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let CreateUser {
            tenant_id,
            external_identity_id,
            email,
            role,
        } = input;

        let checked = async {
            self.db
                .query(
                    "CREATE type::record('user', $id) SET \
                     tenant_id = $tenant_id, \
                     external_identity_id = $external_identity_id, \
                     email = $email, \
                     role = $role, \
                     is_active = true",
                )
                .bind(("id", id_str.clone()))
                .bind(("tenant_id", tenant_id.to_string()))
                .bind(("external_identity_id", external_identity_id))
                .bind(("email", email))
                .bind(("role", role.as_str().to_string()))
                .await?
                .check()
        }
        .await;

        let mut result = match checked {
            Ok(result) => result,
            Err(e) => match DbError::from_statement(e) {
                DbError::Conflict(reason) => {
                    debug!(%tenant_id, %reason, "User insert hit a uniqueness constraint");
                    return Ok(Insert::Conflict);
                }
                other => return Err(other.into()),
            },
        };

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Query(format!("user {id_str} was not returned by CREATE")))?;

        Ok(Insert::Created(row.into_user(id)?))
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> NavieraResult<Lookup<User>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('user', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Lookup::Found(row.into_user(id)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn get_by_external_identity(
        &self,
        tenant_id: Uuid,
        external_identity_id: &str,
    ) -> NavieraResult<Lookup<User>> {
        self.find_one(tenant_id, "external_identity_id", external_identity_id)
            .await
    }

    async fn get_by_email(&self, tenant_id: Uuid, email: &str) -> NavieraResult<Lookup<User>> {
        self.find_one(tenant_id, "email", email).await
    }

    async fn set_active(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> NavieraResult<Lookup<User>> {
        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 is_active = $is_active, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("is_active", is_active))
            .await
            .map_err(DbError::from_statement)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Lookup::Found(row.into_user(id)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> NavieraResult<PaginatedResult<User>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM user \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
