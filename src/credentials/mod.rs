//! # Credentials
//!
//! The registration and login contract shared by every entry point.
//!
//! - **Identity key:** usernames are case-insensitive. A record lives under
//!   `user:<lowercased username>`; the submitted spelling is kept as the
//!   display name inside the record.
//! - **Hashing:** passwords are stored as Argon2id PHC strings. Each call draws
//!   a fresh salt, so hashing the same password twice never yields the same
//!   string.
//! - **Enumeration:** an unknown username and a wrong password produce the same
//!   [`CredentialError::InvalidCredentials`].
//!
//! The HTTP layer only talks to [`RegistrationService`] and
//! [`AuthenticationService`] and turns their results into
//! [`RegistrationOutcome`] / [`AuthenticationOutcome`].

mod authentication;
mod error;
mod hasher;
mod outcome;
mod record;
mod registration;
mod store;
mod validation;

pub use authentication::AuthenticationService;
pub use error::CredentialError;
pub use hasher::{Argon2Hasher, CredentialHasher, HashError, WorkFactor};
pub use outcome::{
    AuthenticationOutcome, AuthenticationStatus, RegistrationOutcome, RegistrationStatus,
};
pub use record::IdentityRecord;
pub use registration::RegistrationService;
pub use store::{IdentityStore, MemoryStore};

/// Prefix of every key written to the identity store.
pub const IDENTITY_KEY_PREFIX: &str = "user:";

/// Canonical form of a username used for lookups.
#[must_use]
pub fn normalize(username: &str) -> String {
    username.to_lowercase()
}

/// Store key for a username: `user:` followed by the normalized name.
#[must_use]
pub fn identity_key(username: &str) -> String {
    format!("{IDENTITY_KEY_PREFIX}{}", normalize(username))
}
