//! Provider catalog service
//!
//! Fetches and caches the list of supported banking providers with their
//! auth-field requirements. The assembled catalog is cached process-wide
//! under a constant key with a 12-hour TTL; the per-provider detail fetches
//! fan out concurrently and are joined with all-settled semantics so one
//! provider's failure never sinks the whole catalog.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::adapters::upstream::UpstreamClient;
use crate::domain::result::Result;
use crate::domain::Provider;
use crate::ports::CacheStore;

/// Constant cache key: one shared catalog per process
pub const SUPPLIERS_CACHE_KEY: &str = "puente-suppliers";

/// Catalog entries are refreshed at most once per 12 hours
const CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 12);

pub struct CatalogService {
    upstream: Arc<UpstreamClient>,
    cache: Arc<dyn CacheStore>,
    country: String,
}

impl CatalogService {
    pub fn new(upstream: Arc<UpstreamClient>, cache: Arc<dyn CacheStore>, country: String) -> Self {
        Self {
            upstream,
            cache,
            country,
        }
    }

    /// Get the detailed provider catalog, serving from cache when fresh
    ///
    /// A cache read failure is treated as a miss: the catalog is still
    /// reachable when the cache backend is down, just slower.
    pub async fn get_suppliers(&self) -> Result<Vec<Provider>> {
        match self.cache.get(SUPPLIERS_CACHE_KEY).await {
            Ok(Some(cached)) => match serde_json::from_str::<Vec<Provider>>(&cached) {
                Ok(providers) => return Ok(providers),
                Err(err) => {
                    tracing::warn!(%err, "cached supplier list is unreadable, refetching");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "cache read failed, falling through to upstream");
            }
        }

        let suppliers = self.fetch_detailed_providers().await?;

        match serde_json::to_string(&suppliers) {
            Ok(value) => {
                if let Err(err) = self
                    .cache
                    .set_with_ttl(SUPPLIERS_CACHE_KEY, &value, CACHE_TTL)
                    .await
                {
                    // The fresh result is still good; only the next caller pays
                    tracing::warn!(%err, "error caching supplier list in kv store");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "error serializing supplier list for cache");
            }
        }

        Ok(suppliers)
    }

    /// Provider names accepted by the login whitelist
    pub async fn valid_provider_names(&self) -> Result<Vec<String>> {
        let suppliers = self.get_suppliers().await?;
        Ok(suppliers.into_iter().map(|p| p.name).collect())
    }

    /// Fetch the flat list, then fan out per-provider detail fetches
    async fn fetch_detailed_providers(&self) -> Result<Vec<Provider>> {
        let listed = self.upstream.list_providers().await?;

        let mut set: JoinSet<(String, Result<Provider>)> = JoinSet::new();
        for item in listed.into_iter().filter(|p| p.country == self.country) {
            let upstream = Arc::clone(&self.upstream);
            set.spawn(async move {
                let detail = upstream.provider_details(&item.code).await;
                (item.code, detail)
            });
        }

        // All-settled join: a rejected detail fetch never cancels siblings
        let mut providers = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(provider))) => providers.push(provider),
                Ok((code, Err(err))) => {
                    // Best-effort catalog: drop this provider, keep the rest
                    tracing::error!(provider = %code, %err, "error getting provider details");
                }
                Err(err) => {
                    tracing::error!(%err, "provider detail task panicked");
                }
            }
        }

        Ok(providers)
    }
}
