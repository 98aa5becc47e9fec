//! Authentication configuration.

use jsonwebtoken::Algorithm;

/// Trust configuration for bearer tokens issued by the external identity
/// provider. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Trusted issuer (`iss` claim), e.g. `https://<project>.supabase.co/auth/v1`.
    pub issuer: String,
    /// Expected audience (`aud` claim).
    pub audience: String,
    /// Signature algorithm the provider signs with.
    pub algorithm: Algorithm,
    /// Shared secret for HMAC algorithms, PEM-encoded public key otherwise.
    pub verification_key: String,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            audience: "authenticated".into(),
            algorithm: Algorithm::HS256,
            verification_key: String::new(),
            leeway_secs: 60,
        }
    }
}
