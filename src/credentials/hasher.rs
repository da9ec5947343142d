//! Password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`),
//! so the salt and cost parameters travel with the hash and verification needs
//! nothing else.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{self, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The platform could not produce a hash (entropy source, worker pool).
    #[error("{0}")]
    Unavailable(String),

    /// The stored hash is not a PHC string this hasher understands.
    #[error("{0}")]
    InvalidFormat(String),
}

/// One-way password hashing with per-call salts.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plaintext` with a freshly generated salt.
    ///
    /// # Errors
    /// [`HashError::Unavailable`] if no salt could be generated or hashing failed.
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Check `plaintext` against a hash produced by [`CredentialHasher::hash`].
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    /// [`HashError::InvalidFormat`] if `hash` cannot be parsed.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError>;
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// # Errors
    /// Returns an error if the work factor is outside what Argon2 accepts.
    pub fn new(work_factor: WorkFactor) -> Result<Self> {
        let params = Params::new(
            work_factor.memory_kib,
            work_factor.iterations,
            work_factor.parallelism,
            None,
        )
        .map_err(|e| anyhow!("invalid Argon2 work factor {work_factor:?}: {e}"))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        self.argon2.params()
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("params", self.params())
            .finish()
    }
}

fn salt() -> Result<SaltString, HashError> {
    let mut bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| HashError::Unavailable(format!("failed to generate salt: {e}")))?;
    SaltString::encode_b64(&bytes)
        .map_err(|e| HashError::Unavailable(format!("failed to encode salt: {e}")))
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = salt()?;
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Unavailable(format!("failed to hash password: {e}")))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| HashError::InvalidFormat(format!("invalid password hash: {e}")))?;

        // The parameters embedded in `parsed` win over `self.argon2`'s, and the
        // final comparison inside `verify_password` is constant-time.
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::InvalidFormat(format!(
                "unsupported password hash: {e}"
            ))),
        }
    }
}

/// Run [`CredentialHasher::hash`] on the blocking pool.
pub(crate) async fn hash_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: SecretString,
) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
        .await
        .map_err(|e| HashError::Unavailable(format!("hashing task failed: {e}")))?
}

/// Run [`CredentialHasher::verify`] on the blocking pool.
pub(crate) async fn verify_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: SecretString,
    hash: String,
) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &hash))
        .await
        .map_err(|e| HashError::Unavailable(format!("verification task failed: {e}")))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Hasher {
        Argon2Hasher::new(WorkFactor {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_is_salted() {
        let hasher = cheap();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first).unwrap());
        assert!(hasher.verify("secret1", &second).unwrap());
    }

    #[test]
    fn hash_is_argon2id_phc() {
        let hash = cheap().hash("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=64,t=1,p=1$"), "{hash}");
        assert!(!hash.contains("secret1"));
    }

    #[test]
    fn verify_rejects_other_password() {
        let hasher = cheap();
        let hash = hasher.hash("secret1").unwrap();
        assert!(!hasher.verify("secret2", &hash).unwrap());
        assert!(!hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("Secret1", &hash).unwrap());
    }

    #[test]
    fn verify_uses_embedded_params() {
        let hash = cheap().hash("secret1").unwrap();
        let stronger = Argon2Hasher::new(WorkFactor {
            memory_kib: 128,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(stronger.verify("secret1", &hash).unwrap());
    }

    #[test]
    fn verify_malformed_hash_is_error() {
        let hasher = cheap();
        for bad in ["", "secret1", "not$a$hash"] {
            assert!(
                matches!(hasher.verify("secret1", bad), Err(HashError::InvalidFormat(_))),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn invalid_work_factor_is_rejected() {
        let result = Argon2Hasher::new(WorkFactor {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn default_work_factor_matches_argon2_defaults() {
        let hasher = Argon2Hasher::new(WorkFactor::default()).unwrap();
        assert_eq!(hasher.params().m_cost(), Params::DEFAULT_M_COST);
        assert_eq!(hasher.params().t_cost(), Params::DEFAULT_T_COST);
        assert_eq!(hasher.params().p_cost(), Params::DEFAULT_P_COST);
    }

    #[tokio::test]
    async fn blocking_helpers_round_trip() {
        let hasher: Arc<dyn CredentialHasher> = Arc::new(cheap());
        let hash = hash_blocking(hasher.clone(), SecretString::from("secret1".to_string()))
            .await
            .unwrap();
        let ok = verify_blocking(hasher, SecretString::from("secret1".to_string()), hash)
            .await
            .unwrap();
        assert!(ok);
    }
}
