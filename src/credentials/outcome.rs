//! Caller-facing results.
//!
//! Converting a service result into an outcome is where internal faults are
//! logged with their detail and then reduced to a bare `InternalError`.

use super::error::CredentialError;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Created,
    Conflict,
    BadRequest,
    InternalError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationStatus {
    Ok,
    Unauthorized,
    BadRequest,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub status: RegistrationStatus,
    pub display_username: Option<String>,
    /// Validation reason, only set for `BadRequest`.
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationOutcome {
    pub status: AuthenticationStatus,
    pub display_username: Option<String>,
    /// Validation reason, only set for `BadRequest`.
    pub detail: Option<String>,
}

fn log_internal(operation: &str, err: &CredentialError) {
    error!(operation, "{err}");
}

impl From<Result<String, CredentialError>> for RegistrationOutcome {
    fn from(result: Result<String, CredentialError>) -> Self {
        let (status, display_username, detail) = match result {
            Ok(display) => (RegistrationStatus::Created, Some(display), None),
            Err(CredentialError::Validation(reason)) => {
                (RegistrationStatus::BadRequest, None, Some(reason))
            }
            Err(CredentialError::DuplicateIdentity) => (RegistrationStatus::Conflict, None, None),
            Err(err) => {
                log_internal("register", &err);
                (RegistrationStatus::InternalError, None, None)
            }
        };

        Self {
            status,
            display_username,
            detail,
        }
    }
}

impl From<Result<String, CredentialError>> for AuthenticationOutcome {
    fn from(result: Result<String, CredentialError>) -> Self {
        let (status, display_username, detail) = match result {
            Ok(display) => (AuthenticationStatus::Ok, Some(display), None),
            Err(CredentialError::Validation(reason)) => {
                (AuthenticationStatus::BadRequest, None, Some(reason))
            }
            Err(CredentialError::InvalidCredentials) => {
                (AuthenticationStatus::Unauthorized, None, None)
            }
            // Registration-only errors should never come out of a login; treat them as faults.
            Err(err) => {
                log_internal("authenticate", &err);
                (AuthenticationStatus::InternalError, None, None)
            }
        };

        Self {
            status,
            display_username,
            detail,
        }
    }
}
