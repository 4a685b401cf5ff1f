//! Ownership and self-targeting checks for mutating operations.

use super::AuthError;

/// Caller may mutate only what it owns.
pub fn ensure_owner(owner_id: i64, caller_id: i64) -> Result<(), AuthError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(AuthError::Ownership)
    }
}

/// Follow and unfollow must target someone else.
pub fn ensure_not_self(target_id: i64, caller_id: i64) -> Result<(), AuthError> {
    if target_id == caller_id {
        Err(AuthError::SelfFollow)
    } else {
        Ok(())
    }
}

/// Resolve a resource's owner through `lookup_owner`, then require that it
/// is the caller.
///
/// Returns `Ok(None)` when the resource does not exist so the caller can
/// report not-found on its own terms. Lookup errors pass through untouched.
pub async fn authorize_owned<F, Fut, E>(
    caller_id: i64,
    lookup_owner: F,
) -> Result<Option<i64>, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Option<i64>, E>>,
    E: From<AuthError>,
{
    match lookup_owner().await? {
        None => Ok(None),
        Some(owner_id) => {
            ensure_owner(owner_id, caller_id)?;
            Ok(Some(owner_id))
        }
    }
}
