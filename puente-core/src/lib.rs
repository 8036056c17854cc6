//! Puente Core - Client for a banking aggregation provider API
//!
//! This crate implements the integration logic following hexagonal
//! architecture:
//!
//! - **domain**: Core entities (Provider, Session, BankAccount, etc.)
//! - **ports**: Trait definitions for external dependencies (CacheStore)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (reqwest executor, upstream client, in-memory cache)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validators;

use std::sync::Arc;

use adapters::memory_cache::MemoryCacheStore;
use adapters::upstream::UpstreamClient;
use services::{CatalogService, CredentialService, SessionService};

// Re-export commonly used types at crate root
pub use adapters::upstream::LoginRequest;
pub use config::Config;
pub use domain::result::{Error, Result};
pub use domain::{
    AccountMovement, BankAccount, Client, Credentials, NextStep, Provider, Session,
    StoredCredential,
};
pub use ports::CacheStore;

/// Main context for Puente operations
///
/// This is the primary entry point for all integration logic. It holds the
/// configuration, the shared upstream client, and all services.
pub struct PuenteContext {
    pub config: Config,
    pub catalog_service: Arc<CatalogService>,
    pub session_service: SessionService,
    pub credential_service: CredentialService,
}

impl PuenteContext {
    /// Create a new Puente context with the in-memory cache backend
    pub fn new(config: Config) -> Result<Self> {
        let cache: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new());
        Self::with_cache(config, cache)
    }

    /// Create a new Puente context backed by a caller-provided cache store
    pub fn with_cache(config: Config, cache: Arc<dyn CacheStore>) -> Result<Self> {
        let upstream = Arc::new(UpstreamClient::new(&config)?);

        let catalog_service = Arc::new(CatalogService::new(
            Arc::clone(&upstream),
            cache,
            config.country.clone(),
        ));
        let session_service =
            SessionService::new(Arc::clone(&upstream), Arc::clone(&catalog_service));
        let credential_service = CredentialService::new(config.encryption_key.clone());

        Ok(Self {
            config,
            catalog_service,
            session_service,
            credential_service,
        })
    }
}
