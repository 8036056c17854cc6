//! Cache store port
//!
//! Key-value store with TTL semantics used for the provider catalog. The
//! catalog service depends only on this trait so tests can substitute an
//! in-memory fake with controllable expiry.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::result::Result;

/// Key-value cache with get / set-with-ttl semantics
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value, `None` on miss or expired entry
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value that expires after `ttl`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
