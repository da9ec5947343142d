//! Shape checks on incoming requests. Only presence and length are checked.

use super::error::CredentialError;

pub(super) const MIN_USERNAME_CHARS: usize = 3;
pub(super) const MIN_PASSWORD_CHARS: usize = 6;

pub(super) fn validate_registration(
    username: &str,
    password: &str,
    phone: &str,
) -> Result<(), CredentialError> {
    if username.is_empty() || password.is_empty() || phone.is_empty() {
        return Err(CredentialError::Validation(
            "Missing username, password, or phone number".to_string(),
        ));
    }
    if username.chars().count() < MIN_USERNAME_CHARS {
        return Err(CredentialError::Validation(format!(
            "Username must be at least {MIN_USERNAME_CHARS} characters"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(CredentialError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

pub(super) fn validate_login(username: &str, password: &str) -> Result<(), CredentialError> {
    if username.is_empty() || password.is_empty() {
        return Err(CredentialError::Validation(
            "Missing username or password".to_string(),
        ));
    }
    Ok(())
}
