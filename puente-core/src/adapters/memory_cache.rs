//! In-memory cache store
//!
//! Process-local [`CacheStore`] used as the default backend and as the test
//! substitute with controllable expiry. Entries are last-write-wins; the
//! catalog only caches idempotent recomputations of the same upstream truth,
//! so no locking beyond the map mutex is needed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::ports::CacheStore;

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force an entry to expire immediately (test hook)
    pub fn expire_now(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some((_, expires_at)) = entries.get_mut(key) {
            *expires_at = Instant::now();
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Cache("cache lock poisoned".to_string()))?;

        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Cache("cache lock poisoned".to_string()))?;

        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }
}

/// Cache store that fails every operation (test double for outage scenarios)
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingCacheStore;

#[cfg(test)]
#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Cache("cache backend unreachable".to_string()))
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Err(Error::Cache("cache backend unreachable".to_string()))
    }
}
