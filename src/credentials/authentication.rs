use super::{
    error::CredentialError,
    hasher::{verify_blocking, CredentialHasher},
    identity_key,
    record::IdentityRecord,
    store::IdentityStore,
    validation::validate_login,
};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Checks login attempts against stored identities. Never writes.
#[derive(Clone)]
pub struct AuthenticationService {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AuthenticationService {
    #[must_use]
    pub fn new(store: Arc<dyn IdentityStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Verify a login attempt and return the display username.
    ///
    /// # Errors
    /// - [`CredentialError::Validation`] if a field is missing
    /// - [`CredentialError::InvalidCredentials`] for an unknown user or wrong password
    /// - [`CredentialError::CorruptRecord`] if the stored record or hash is unusable
    /// - [`CredentialError::HasherUnavailable`] / [`CredentialError::Internal`] on faults
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, CredentialError> {
        validate_login(username, password.expose_secret())?;

        let key = identity_key(username);

        let Some(raw) = self
            .store
            .get(&key)
            .await
            .context("failed to look up identity")?
            .filter(|value| !value.is_empty())
        else {
            debug!(%key, "no such identity");
            return Err(CredentialError::InvalidCredentials);
        };

        let record = IdentityRecord::from_json(&raw)
            .map_err(|e| CredentialError::CorruptRecord(format!("{key}: {e:#}")))?;

        let verified = verify_blocking(
            self.hasher.clone(),
            SecretString::from(password.expose_secret().to_string()),
            record.password_hash,
        )
        .await?;

        if !verified {
            debug!(%key, "password mismatch");
            return Err(CredentialError::InvalidCredentials);
        }

        info!(%key, "user logged in");

        Ok(record.display_username)
    }
}
