//! Adapter implementations
//!
//! Adapters implement the port traits and the outbound integrations with
//! concrete technologies:
//! - Resilient request executor over reqwest
//! - Upstream aggregation API client (wire types + endpoints)
//! - In-memory cache store for the CacheStore port
//! - Mock upstream API server for testing

pub mod executor;
pub mod memory_cache;
pub mod upstream;

#[cfg(test)]
pub mod upstream_mock;
