use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::state::security_config::SecurityConfig;

/// Claims carried by backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id as a decimal string
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidSignature)
    }
}

fn unix_seconds(t: SystemTime) -> Option<i64> {
    t.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
}

/// Mint an HS256 access token for `user_id`, valid for the configured TTL.
pub fn mint_access_token(
    user_id: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::Signing("signing key is empty".into()));
    }
    let iat = unix_seconds(now).ok_or_else(|| AuthError::Signing("clock before epoch".into()))?;
    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AuthError::Signing("token ttl out of range".into()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat.saturating_add(ttl),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verify a token against the system clock.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    verify_access_token_at(token, SystemTime::now(), security)
}

/// Verify signature, then expiry against `now`.
///
/// The library's own expiry check is disabled so the boundary is exact:
/// a token is accepted while `now <= exp`.
pub fn verify_access_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidSignature)?;

    let now = unix_seconds(now).ok_or(AuthError::ExpiredToken)?;
    if now > claims.exp {
        return Err(AuthError::ExpiredToken);
    }

    claims.user_id()?;
    Ok(claims)
}
