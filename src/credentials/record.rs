use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Persisted identity.
///
/// Serialized as `{"username": .., "password_hash": .., "phone": ..}`; the field
/// names are part of the stored format. `phone` is optional on read since login
/// never looks at it; `username` is required because it is what login returns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Username exactly as submitted at registration.
    #[serde(rename = "username")]
    pub display_username: String,
    pub password_hash: String,
    #[serde(default)]
    pub phone: String,
}

impl IdentityRecord {
    #[must_use]
    pub fn new(display_username: &str, password_hash: String, phone: &str) -> Self {
        Self {
            display_username: display_username.to_string(),
            password_hash,
            phone: phone.to_string(),
        }
    }

    /// # Errors
    /// Returns an error if the record cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a stored record, rejecting records without a password hash.
    ///
    /// # Errors
    /// Returns an error if the value is not a record or has no password hash.
    pub fn from_json(raw: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(raw).context("undecodable record")?;
        if record.password_hash.is_empty() {
            bail!("record has no password_hash");
        }
        Ok(record)
    }
}
