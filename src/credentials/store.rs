//! Identity storage.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

/// Key-value storage for serialized identity records.
///
/// An empty value is indistinguishable from a missing key on some backends, so
/// implementations report empty values as absent.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Raw record stored at `key`, or `None` when missing or empty.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditional upsert.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Write `value` only if `key` holds no record; returns whether it wrote.
    ///
    /// The default is `get` followed by `put` and is **not** atomic: two
    /// concurrent callers can both see the key as free and the later `put`
    /// wins. Backends with a native conditional write must override this.
    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        if self.get(key).await?.is_some_and(|v| !v.is_empty()) {
            return Ok(false);
        }
        self.put(key, value).await?;
        Ok(true)
    }
}

/// In-process store. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty records.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|v| !v.is_empty())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).filter(|v| !v.is_empty()).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if !slot.get().is_empty() {
                    debug!(key, "put_if_absent: key taken");
                    return Ok(false);
                }
                slot.insert(value.to_string());
            }
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
            }
        }
        Ok(true)
    }
}
