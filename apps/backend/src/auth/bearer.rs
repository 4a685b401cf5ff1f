use super::AuthError;

/// Pull the token out of an `Authorization` header value.
///
/// Only `Bearer <token>` is accepted: exactly two whitespace-separated parts,
/// the literal scheme `Bearer`, and a non-empty token.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingCredential)?;
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingCredential),
    }
}
