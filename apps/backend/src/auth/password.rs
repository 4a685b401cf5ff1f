use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::AuthError;

/// Hash a plaintext password into an Argon2id PHC string with a fresh salt.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(e.to_string()))
}

/// Check `candidate` against a stored PHC string.
///
/// A stored value that does not parse counts as a mismatch; it can never
/// have been produced by [`hash_password`].
pub fn verify_password(stored_hash: &str, candidate: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordMismatch)?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|_| AuthError::PasswordMismatch)
}
