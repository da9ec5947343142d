use super::hasher::HashError;

/// Failures of a registration or login attempt.
///
/// The first three variants are caller-facing; the rest are internal faults
/// that are logged and reported as an opaque internal error.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("identity already exists")]
    DuplicateIdentity,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("corrupt identity record: {0}")]
    CorruptRecord(String),

    #[error("credential hasher unavailable: {0}")]
    HasherUnavailable(String),

    #[error("identity store failure: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl CredentialError {
    /// Whether the error is a server-side fault rather than a rejected request.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::CorruptRecord(_) | Self::HasherUnavailable(_) | Self::Internal(_)
        )
    }
}

impl From<HashError> for CredentialError {
    fn from(err: HashError) -> Self {
        match err {
            // A stored hash that cannot be parsed means the record is damaged.
            HashError::InvalidFormat(detail) => Self::CorruptRecord(detail),
            HashError::Unavailable(detail) => Self::HasherUnavailable(detail),
        }
    }
}
