//! User domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NavieraError;

/// Role of a user inside its tenant. Checked by equality only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Admin,
    #[default]
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "owner",
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = NavieraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(UserRole::Owner),
            "admin" => Ok(UserRole::Admin),
            "customer" => Ok(UserRole::Customer),
            other => Err(NavieraError::Validation {
                message: format!("unknown user role: {other}"),
            }),
        }
    }
}

/// A tenant-local account bound to one external identity.
///
/// `(external_identity_id, tenant_id)` and `(email, tenant_id)` are both
/// unique. A user never moves to another tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Subject claim issued by the external identity provider.
    pub external_identity_id: String,
    pub email: String,
    pub tenant_id: Uuid,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub tenant_id: Uuid,
    pub external_identity_id: String,
    pub email: String,
    pub role: UserRole,
}

impl CreateUser {
    /// A just-in-time provisioned account: `customer` role, active.
    pub fn customer(tenant_id: Uuid, external_identity_id: String, email: String) -> Self {
        Self {
            tenant_id,
            external_identity_id,
            email,
            role: UserRole::Customer,
        }
    }
}
