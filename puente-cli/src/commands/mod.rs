//! CLI command implementations

pub mod accounts;
pub mod clients;
pub mod credential;
pub mod login;
pub mod logout;
pub mod movements;
pub mod providers;

use anyhow::{Context, Result};
use puente_core::{Config, PuenteContext};

/// Build the Puente context from the environment
pub fn get_context() -> Result<PuenteContext> {
    let config = Config::from_env().context("failed to load configuration from environment")?;
    PuenteContext::new(config).context("failed to initialize puente context")
}
