//! Input normalisation shared by the user and post services.

use lazy_regex::regex_is_match;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Trim `value` and reject it if nothing is left.
pub fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("The {field} field is required and cannot be blank"),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn email(value: &str) -> Result<String, AppError> {
    let email = required("email", value)?;
    if !regex_is_match!(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$",
        &email
    ) {
        return Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "The email address is not valid",
        ));
    }
    Ok(email)
}
