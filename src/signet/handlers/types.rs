//! Request/response bodies for the credential endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// Missing and null fields are `None` so they fail validation with a readable
// reason instead of a JSON error.
#[derive(ToSchema, Deserialize, Default)]
#[serde(default)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CredentialResponse {
    pub message: String,
    pub username: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
