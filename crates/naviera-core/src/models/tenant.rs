//! Tenant domain model.
//!
//! A tenant is an isolated logistics-company namespace. Every user
//! belongs to exactly one tenant, and every request is scoped to the
//! tenant named by its slug before any identity check runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isolated namespace addressed by an immutable, globally unique slug.
///
/// Tenants are created out-of-band (seeding or administration) and are
/// read-only to the authorization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Globally unique, human-readable key (e.g., `naviera`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Opaque key-value settings.
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub slug: String,
    pub name: String,
    pub settings: Option<serde_json::Value>,
}
