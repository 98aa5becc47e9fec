//! Command-line and environment configuration.

use anyhow::{Result, anyhow};
use clap::Args;
use jsonwebtoken::Algorithm;
use naviera_auth::AuthConfig;
use naviera_db::DbConfig;

/// SurrealDB connection settings.
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    /// Endpoint, e.g. `ws://127.0.0.1:8000` or `mem://`.
    #[arg(long = "db-url", env = "NAVIERA_DB_URL", default_value = "ws://127.0.0.1:8000")]
    pub url: String,

    #[arg(long = "db-namespace", env = "NAVIERA_DB_NAMESPACE", default_value = "naviera")]
    pub namespace: String,

    #[arg(long = "db-database", env = "NAVIERA_DB_DATABASE", default_value = "main")]
    pub database: String,

    #[arg(long = "db-username", env = "NAVIERA_DB_USERNAME")]
    pub username: Option<String>,

    #[arg(long = "db-password", env = "NAVIERA_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            url: args.url,
            namespace: args.namespace,
            database: args.database,
            username: args.username,
            password: args.password,
        }
    }
}

/// Identity provider trust settings.
#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// Trusted token issuer (`iss`).
    #[arg(long = "jwt-issuer", env = "NAVIERA_JWT_ISSUER")]
    pub issuer: String,

    /// Expected token audience (`aud`).
    #[arg(long = "jwt-audience", env = "NAVIERA_JWT_AUDIENCE", default_value = "authenticated")]
    pub audience: String,

    /// Signature algorithm, e.g. `HS256`, `RS256`, `ES256`, `EdDSA`.
    #[arg(long = "jwt-algorithm", env = "NAVIERA_JWT_ALGORITHM", default_value = "HS256")]
    pub algorithm: String,

    /// HMAC secret, or PEM public key for asymmetric algorithms.
    #[arg(long = "jwt-key", env = "NAVIERA_JWT_KEY", hide_env_values = true)]
    pub verification_key: String,

    /// Tolerated clock skew in seconds.
    #[arg(long = "jwt-leeway", env = "NAVIERA_JWT_LEEWAY_SECS", default_value_t = 60)]
    pub leeway_secs: u64,
}

impl AuthArgs {
    pub fn into_config(self) -> Result<AuthConfig> {
        let algorithm: Algorithm = self
            .algorithm
            .parse()
            .map_err(|_| anyhow!("unsupported JWT algorithm: {}", self.algorithm))?;

        Ok(AuthConfig {
            issuer: self.issuer,
            audience: self.audience,
            algorithm,
            verification_key: self.verification_key,
            leeway_secs: self.leeway_secs,
        })
    }
}
