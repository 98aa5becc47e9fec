//! Naviera API: the HTTP surface over the authorization pipeline.
//!
//! Requests name their tenant in the `X-Tenant-Slug` header and carry an
//! identity-provider token in `Authorization: Bearer <token>`.
//!
//! - `GET /health`
//! - `POST /api/v1/users/onboard` - get-or-create the caller's user
//! - `GET /api/v1/users` - users of the caller's tenant
//! - `GET /api/v1/tenants` - public tenant directory
//! - `GET /api/v1/tenants/{id}/users` - owner/admin listing

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
