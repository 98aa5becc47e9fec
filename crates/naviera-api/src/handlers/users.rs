//! User handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use naviera_auth::{Principal, ProvisionStatus};
use naviera_core::models::user::{User, UserRole};
use naviera_core::repository::UserRepository;
use serde::Serialize;
use uuid::Uuid;

use super::{Page, PageParams};
use crate::error::ApiResult;
use crate::extract::{Authenticated, Credentials};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub external_identity_id: String,
    pub email: String,
    pub tenant_id: Uuid,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            external_identity_id: user.external_identity_id,
            email: user.email,
            tenant_id: user.tenant_id,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OnboardResponse {
    pub tenant_slug: String,
    pub created: bool,
    pub user: UserBody,
}

/// POST /api/v1/users/onboard
///
/// 201 when this call created the user, 200 when it already existed.
pub async fn onboard(
    State(state): State<AppState>,
    credentials: Credentials,
) -> ApiResult<(StatusCode, Json<OnboardResponse>)> {
    let (principal, status) = state
        .gate
        .onboard_with_status(credentials.tenant_slug(), credentials.bearer_token())
        .await?;

    let created = status == ProvisionStatus::Created;
    let code = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((code, Json(onboard_body(&principal, created))))
}

fn onboard_body(principal: &Principal, created: bool) -> OnboardResponse {
    OnboardResponse {
        tenant_slug: principal.tenant().slug.clone(),
        created,
        user: principal.user().clone().into(),
    }
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<UserBody>>> {
    let result = state
        .users
        .list(principal.tenant().id, params.into())
        .await?;
    Ok(Json(result.into()))
}
