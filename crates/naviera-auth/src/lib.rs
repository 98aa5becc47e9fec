//! Naviera Auth: the per-request authorization pipeline.
//!
//! Every request runs tenant resolution, then bearer token validation,
//! then a tenant-scoped user lookup (or, on the onboarding path,
//! get-or-create provisioning). The result is a [`Principal`].

pub mod config;
pub mod error;
pub mod gate;
pub mod provisioner;
pub mod tenant;
pub mod token;

pub use config::AuthConfig;
pub use error::{AuthError, ErrorClass};
pub use gate::{AuthorizationGate, Principal, ProvisionStatus};
pub use provisioner::{IdentityProvisioner, Provisioned};
pub use tenant::TenantResolver;
pub use token::{IdentityClaims, TokenValidator};
