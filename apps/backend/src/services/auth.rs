use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use super::not_found;
use super::users::OwnedUser;
use crate::auth::{hash_password, mint_access_token, verify_password, AuthError};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::ownership::ResourceKind;
use crate::repos::users;
use crate::state::security_config::SecurityConfig;

/// Argon2 is CPU-bound; keep it off the async workers.
pub(crate) async fn hash_off_thread(plaintext: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(|e| AppError::internal(format!("hashing task failed: {e}")))?
        .map_err(AppError::from)
}

async fn verify_off_thread(stored_hash: String, candidate: String) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || verify_password(&stored_hash, &candidate))
        .await
        .map_err(|e| AppError::internal(format!("verification task failed: {e}")))?
        .map_err(AppError::from)
}

/// Check an email/password pair and mint an access token for its owner.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let Some(credential) = users::find_credential_by_email(conn, email).await? else {
        warn!(email = %Redacted(email), "login_unknown_email");
        return Err(AuthError::PasswordMismatch.into());
    };

    if let Err(err) = verify_off_thread(credential.password_hash, password.to_string()).await {
        warn!(user_id = credential.user_id, "login_password_mismatch");
        return Err(err);
    }

    let token = mint_access_token(credential.user_id, now, security)?;
    info!(user_id = credential.user_id, "login_succeeded");
    Ok(token)
}

/// Replace the owned user's password after re-checking the current one.
pub async fn change_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: OwnedUser,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let user_id = user.id();

    if new_password.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "The new password cannot be blank",
        ));
    }

    let stored = users::find_password_hash(conn, user_id)
        .await?
        .ok_or_else(|| not_found(ResourceKind::User, user_id))?;

    verify_off_thread(stored, current_password.to_string()).await?;

    let new_hash = hash_off_thread(new_password.to_string()).await?;
    if !users::update_password_hash(conn, user_id, &new_hash).await? {
        return Err(not_found(ResourceKind::User, user_id));
    }
    info!(user_id, "password_changed");
    Ok(())
}
