//! Tenant handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use naviera_auth::AuthError;
use naviera_core::models::tenant::Tenant;
use naviera_core::models::user::UserRole;
use naviera_core::repository::{TenantRepository, UserRepository};
use serde::Serialize;
use uuid::Uuid;

use super::users::UserBody;
use super::{Page, PageParams};
use crate::error::ApiResult;
use crate::extract::Authenticated;
use crate::state::AppState;

/// Public tenant listing entry. Settings are not exposed.
#[derive(Debug, Serialize)]
pub struct TenantListItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Tenant> for TenantListItem {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name,
            slug: tenant.slug,
        }
    }
}

/// GET /api/v1/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<TenantListItem>>> {
    let result = state.tenants.list(params.into()).await?;
    Ok(Json(result.into()))
}

/// GET /api/v1/tenants/{id}/users
///
/// Owners and admins may list the users of their own tenant only.
pub async fn list_tenant_users(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    Path(tenant_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<UserBody>>> {
    state
        .gate
        .authorize_role(&principal, &[UserRole::Owner, UserRole::Admin])?;

    if principal.tenant().id != tenant_id {
        return Err(AuthError::AccessDenied.into());
    }

    let result = state.users.list(tenant_id, params.into()).await?;
    Ok(Json(result.into()))
}
