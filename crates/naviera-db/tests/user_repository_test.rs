//! Integration tests for the Tenant and User repositories using
//! in-memory SurrealDB.

use naviera_core::error::NavieraError;
use naviera_core::models::tenant::CreateTenant;
use naviera_core::models::user::{CreateUser, UserRole};
use naviera_core::repository::{Insert, Lookup, Pagination, TenantRepository, UserRepository};
use naviera_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, create one tenant.
async fn setup() -> (Surreal<Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    naviera_db::run_migrations(&db).await.unwrap();

    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let tenant = tenant_repo
        .create(CreateTenant {
            slug: "naviera".into(),
            name: "Naviera Logistics".into(),
            settings: None,
        })
        .await
        .unwrap();

    (db, tenant.id)
}

fn created<T: std::fmt::Debug>(insert: Insert<T>) -> T {
    match insert {
        Insert::Created(v) => v,
        Insert::Conflict => panic!("expected Created, got Conflict"),
    }
}

#[tokio::test]
async fn tenant_lookup_by_slug_and_id() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let Lookup::Found(by_slug) = repo.get_by_slug("naviera").await.unwrap() else {
        panic!("tenant should be found by slug");
    };
    assert_eq!(by_slug.id, tenant_id);
    assert_eq!(by_slug.name, "Naviera Logistics");
    assert_eq!(by_slug.settings, serde_json::json!({}));

    let Lookup::Found(by_id) = repo.get_by_id(tenant_id).await.unwrap() else {
        panic!("tenant should be found by id");
    };
    assert_eq!(by_id.slug, "naviera");
}

#[tokio::test]
async fn unknown_tenant_is_not_found_not_an_error() {
    let (db, _) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    assert_eq!(repo.get_by_slug("nope").await.unwrap(), Lookup::NotFound);
    assert_eq!(repo.get_by_id(Uuid::new_v4()).await.unwrap(), Lookup::NotFound);
}

#[tokio::test]
async fn duplicate_tenant_slug_is_rejected() {
    let (db, _) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let err = repo
        .create(CreateTenant {
            slug: "naviera".into(),
            name: "Other".into(),
            settings: None,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, NavieraError::AlreadyExists { .. }),
        "expected AlreadyExists, got: {err:?}"
    );
}

#[tokio::test]
async fn list_tenants_is_paginated() {
    let (db, _) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    for slug in ["acme", "zeta"] {
        repo.create(CreateTenant {
            slug: slug.into(),
            name: slug.to_uppercase(),
            settings: Some(serde_json::json!({"region": "eu"})),
        })
        .await
        .unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].slug, "acme");
    assert_eq!(page.items[0].settings["region"], "eu");
}

#[tokio::test]
async fn insert_and_get_user() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = created(
        repo.insert(CreateUser::customer(tenant_id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );

    assert_eq!(user.tenant_id, tenant_id);
    assert_eq!(user.external_identity_id, "u1");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.role, UserRole::Customer);
    assert!(user.is_active);

    let Lookup::Found(fetched) = repo.get_by_id(tenant_id, user.id).await.unwrap() else {
        panic!("user should be found by id");
    };
    assert_eq!(fetched.id, user.id);

    let Lookup::Found(by_subject) = repo.get_by_external_identity(tenant_id, "u1").await.unwrap()
    else {
        panic!("user should be found by subject");
    };
    assert_eq!(by_subject.id, user.id);

    let Lookup::Found(by_email) = repo.get_by_email(tenant_id, "a@x.com").await.unwrap() else {
        panic!("user should be found by email");
    };
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_subject_in_tenant_is_a_conflict() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    created(
        repo.insert(CreateUser::customer(tenant_id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );

    let second = repo
        .insert(CreateUser::customer(tenant_id, "u1".into(), "other@x.com".into()))
        .await
        .unwrap();
    assert_eq!(second, Insert::Conflict);
}

#[tokio::test]
async fn duplicate_email_in_tenant_is_a_conflict() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    created(
        repo.insert(CreateUser::customer(tenant_id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );

    let second = repo
        .insert(CreateUser::customer(tenant_id, "u2".into(), "a@x.com".into()))
        .await
        .unwrap();
    assert_eq!(second, Insert::Conflict);
}

#[tokio::test]
async fn same_identity_in_two_tenants_yields_two_users() {
    let (db, naviera_id) = setup().await;
    let tenants = SurrealTenantRepository::new(db.clone());
    let other = tenants
        .create(CreateTenant {
            slug: "acme".into(),
            name: "Acme Freight".into(),
            settings: None,
        })
        .await
        .unwrap();

    let repo = SurrealUserRepository::new(db);
    let a = created(
        repo.insert(CreateUser::customer(naviera_id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );
    let b = created(
        repo.insert(CreateUser::customer(other.id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );

    assert_ne!(a.id, b.id);
    assert_eq!(
        repo.get_by_id(other.id, a.id).await.unwrap(),
        Lookup::NotFound,
        "a user must not be visible through another tenant"
    );
}

#[tokio::test]
async fn insert_for_missing_tenant_is_an_error() {
    let (db, _) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo
        .insert(CreateUser::customer(Uuid::new_v4(), "u1".into(), "a@x.com".into()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, NavieraError::Database(_)),
        "expected Database error, got: {err:?}"
    );
}

#[tokio::test]
async fn set_active_toggles_flag() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = created(
        repo.insert(CreateUser::customer(tenant_id, "u1".into(), "a@x.com".into()))
            .await
            .unwrap(),
    );

    let Lookup::Found(updated) = repo.set_active(tenant_id, user.id, false).await.unwrap() else {
        panic!("user should be updated");
    };
    assert!(!updated.is_active);

    assert_eq!(
        repo.set_active(tenant_id, Uuid::new_v4(), false)
            .await
            .unwrap(),
        Lookup::NotFound
    );
}

#[tokio::test]
async fn list_users_is_tenant_scoped() {
    let (db, tenant_id) = setup().await;
    let tenants = SurrealTenantRepository::new(db.clone());
    let other = tenants
        .create(CreateTenant {
            slug: "acme".into(),
            name: "Acme Freight".into(),
            settings: None,
        })
        .await
        .unwrap();

    let repo = SurrealUserRepository::new(db);
    for i in 0..3 {
        created(
            repo.insert(CreateUser::customer(
                tenant_id,
                format!("u{i}"),
                format!("u{i}@x.com"),
            ))
            .await
            .unwrap(),
        );
    }
    created(
        repo.insert(CreateUser::customer(other.id, "x".into(), "x@x.com".into()))
            .await
            .unwrap(),
    );

    let page = repo.list(tenant_id, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
    assert!(page.items.iter().all(|u| u.tenant_id == tenant_id));
}
