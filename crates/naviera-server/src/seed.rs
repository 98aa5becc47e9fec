//! Idempotent tenant (and optional owner) seeding.

use anyhow::Result;
use naviera_core::models::tenant::{CreateTenant, Tenant};
use naviera_core::models::user::{CreateUser, UserRole};
use naviera_core::repository::{Insert, Lookup, TenantRepository, UserRepository};
use naviera_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use surrealdb::{Connection, Surreal};
use tracing::info;

#[derive(Debug, Clone)]
pub struct SeedOwner {
    pub email: String,
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct SeedRequest {
    pub slug: String,
    pub name: String,
    pub owner: Option<SeedOwner>,
}

#[derive(Debug)]
pub struct SeedReport {
    pub tenant: Tenant,
    pub tenant_created: bool,
    pub owner_created: bool,
}

/// Create the tenant unless its slug exists, then the owner unless a user
/// with that email exists in the tenant. Safe to run repeatedly.
pub async fn seed<C: Connection>(db: &Surreal<C>, request: SeedRequest) -> Result<SeedReport> {
    let tenants = SurrealTenantRepository::new(db.clone());
    let users = SurrealUserRepository::new(db.clone());

    let (tenant, tenant_created) = match tenants.get_by_slug(&request.slug).await? {
        Lookup::Found(tenant) => {
            info!(slug = %tenant.slug, "Tenant already exists, skipping");
            (tenant, false)
        }
        Lookup::NotFound => {
            let tenant = tenants
                .create(CreateTenant {
                    slug: request.slug,
                    name: request.name,
                    settings: None,
                })
                .await?;
            info!(slug = %tenant.slug, tenant_id = %tenant.id, "Created tenant");
            (tenant, true)
        }
    };

    let Some(owner) = request.owner else {
        return Ok(SeedReport {
            tenant,
            tenant_created,
            owner_created: false,
        });
    };

    let owner_created = match users.get_by_email(tenant.id, &owner.email).await? {
        Lookup::Found(_) => {
            info!(tenant_id = %tenant.id, "Owner already exists, skipping");
            false
        }
        Lookup::NotFound => {
            let outcome = users
                .insert(CreateUser {
                    tenant_id: tenant.id,
                    external_identity_id: owner.subject,
                    email: owner.email,
                    role: UserRole::Owner,
                })
                .await?;
            match outcome {
                Insert::Created(user) => {
                    info!(tenant_id = %tenant.id, user_id = %user.id, "Created owner");
                    true
                }
                Insert::Conflict => {
                    info!(tenant_id = %tenant.id, "Owner identity already bound, skipping");
                    false
                }
            }
        }
    };

    Ok(SeedReport {
        tenant,
        tenant_created,
        owner_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::{Db, Mem};

    async fn db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        naviera_db::run_migrations(&db).await.unwrap();
        db
    }

    fn request() -> SeedRequest {
        SeedRequest {
            slug: "naviera".into(),
            name: "Naviera Logistics".into(),
            owner: Some(SeedOwner {
                email: "owner@naviera.test".into(),
                subject: "owner-sub".into(),
            }),
        }
    }

    #[tokio::test]
    async fn seeding_twice_is_a_no_op() {
        let db = db().await;

        let first = seed(&db, request()).await.unwrap();
        assert!(first.tenant_created);
        assert!(first.owner_created);

        let second = seed(&db, request()).await.unwrap();
        assert!(!second.tenant_created);
        assert!(!second.owner_created);
        assert_eq!(second.tenant.id, first.tenant.id);

        let users = SurrealUserRepository::new(db);
        let Lookup::Found(owner) = users
            .get_by_external_identity(first.tenant.id, "owner-sub")
            .await
            .unwrap()
        else {
            panic!("owner should exist");
        };
        assert_eq!(owner.role, UserRole::Owner);
    }

    #[tokio::test]
    async fn owner_is_optional() {
        let db = db().await;
        let report = seed(
            &db,
            SeedRequest {
                owner: None,
                ..request()
            },
        )
        .await
        .unwrap();

        assert!(report.tenant_created);
        assert!(!report.owner_created);
    }
}
