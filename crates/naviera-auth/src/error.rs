//! Authorization pipeline error types.

use naviera_core::error::NavieraError;
use thiserror::Error;

/// Failures surfaced by the authorization pipeline.
///
/// Messages never say why a token was rejected or whether an identity
/// exists in some other tenant.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("tenant context is missing")]
    MissingTenantContext,

    #[error("tenant not found")]
    TenantNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("access denied")]
    AccessDenied,

    #[error("account is inactive")]
    InactiveAccount,

    #[error("user provisioning failed: {0}")]
    ProvisioningFailed(String),

    #[error("auth configuration error: {0}")]
    Configuration(String),

    #[error("storage error: {0}")]
    Storage(#[from] NavieraError),
}

/// Status classification of an [`AuthError`] at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    NotFound,
    Unauthorized,
    Forbidden,
    ServerError,
}

impl AuthError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::MissingTenantContext => ErrorClass::BadRequest,
            AuthError::TenantNotFound => ErrorClass::NotFound,
            AuthError::InvalidCredentials => ErrorClass::Unauthorized,
            AuthError::AccessDenied | AuthError::InactiveAccount => ErrorClass::Forbidden,
            AuthError::ProvisioningFailed(_)
            | AuthError::Configuration(_)
            | AuthError::Storage(_) => ErrorClass::ServerError,
        }
    }

    /// Only a failed provisioning attempt may be retried by the caller.
    ///
    /// A retry cannot clear a `ProvisioningFailed` caused by the email being
    /// held by another identity in the tenant. The message names that case.
    pub fn is_retriable(&self) -> bool {
        matches!(self, AuthError::ProvisioningFailed(_))
    }
}
