use super::{
    error::CredentialError,
    hasher::{hash_blocking, CredentialHasher},
    identity_key,
    record::IdentityRecord,
    store::IdentityStore,
    validation::validate_registration,
};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Creates identities.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(store: Arc<dyn IdentityStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Register a new identity and return the display username.
    ///
    /// The store is written exactly once on success and never on failure.
    ///
    /// # Errors
    /// - [`CredentialError::Validation`] for missing or too-short fields
    /// - [`CredentialError::DuplicateIdentity`] if the normalized username is taken
    /// - [`CredentialError::HasherUnavailable`] / [`CredentialError::Internal`] on faults
    #[instrument(skip(self, password, phone))]
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
        phone: &str,
    ) -> Result<String, CredentialError> {
        validate_registration(username, password.expose_secret(), phone)?;

        let key = identity_key(username);

        // Cheap rejection before paying for a hash.
        if self
            .store
            .get(&key)
            .await
            .context("failed to look up identity")?
            .is_some_and(|value| !value.is_empty())
        {
            return Err(CredentialError::DuplicateIdentity);
        }

        let password_hash = hash_blocking(
            self.hasher.clone(),
            SecretString::from(password.expose_secret().to_string()),
        )
        .await?;

        let record = IdentityRecord::new(username, password_hash, phone);
        let value = record
            .to_json()
            .context("failed to serialize identity record")?;

        if !self
            .store
            .put_if_absent(&key, &value)
            .await
            .context("failed to store identity")?
        {
            warn!(%key, "identity registered concurrently");
            return Err(CredentialError::DuplicateIdentity);
        }

        info!(%key, "user signed up");

        Ok(record.display_username)
    }
}
