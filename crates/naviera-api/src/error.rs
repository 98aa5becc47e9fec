//! API error types.
//!
//! Every pipeline failure is rendered as
//! `{"status":"error","code":...,"message":...}` with a fixed status code
//! per failure kind. Server-side failures are logged and answered with a
//! generic message.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use naviera_auth::{AuthError, ErrorClass};
use naviera_core::error::NavieraError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<NavieraError> for ApiError {
    fn from(err: NavieraError) -> Self {
        ApiError::Auth(AuthError::Storage(err))
    }
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err.class() {
                ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
                ErrorClass::NotFound => StatusCode::NOT_FOUND,
                ErrorClass::Unauthorized => StatusCode::UNAUTHORIZED,
                ErrorClass::Forbidden => StatusCode::FORBIDDEN,
                ErrorClass::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingTenantContext => "MISSING_TENANT_CONTEXT",
                AuthError::TenantNotFound => "TENANT_NOT_FOUND",
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::AccessDenied => "ACCESS_DENIED",
                AuthError::InactiveAccount => "INACTIVE_ACCOUNT",
                AuthError::ProvisioningFailed(_) => "PROVISIONING_FAILED",
                AuthError::Configuration(_) | AuthError::Storage(_) => "INTERNAL_ERROR",
            },
        }
    }

    /// Client-facing message. Server-side detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Auth(AuthError::ProvisioningFailed(_)) => {
                "user provisioning failed, retry the request".into()
            }
            Self::Auth(AuthError::Configuration(_) | AuthError::Storage(_)) => {
                "internal server error".into()
            }
            other => other.to_string(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            status: "error",
            code: self.error_code(),
            message: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
