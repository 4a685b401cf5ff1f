use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Lifetime of every access token unless overridden at startup.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Signing material and token policy, fixed once the server starts.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Always HS256 for backend-issued tokens
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

// Keeps the secret out of Debug output.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
