//! API route definitions.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, tenants, users};
use crate::state::AppState;

/// Build the application router.
///
/// Authentication is per handler: `onboard` runs the provisioning
/// pipeline, the [`Authenticated`](crate::extract::Authenticated)
/// extractor runs `authenticate`.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users/onboard", post(users::onboard))
        .route("/users", get(users::list_users))
        .route("/tenants", get(tenants::list_tenants))
        .route("/tenants/{id}/users", get(tenants::list_tenant_users));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
