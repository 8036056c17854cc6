//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with serde mappings for the upstream wire shapes - no I/O.

mod account;
mod credential;
mod provider;
mod session;
pub mod result;

pub use account::{AccountMovement, BankAccount};
pub use credential::{Credentials, StoredCredential};
pub use provider::{AccountType, AuthField, BankMetadata, Choice, Provider, ProviderMethods};
pub use session::{Client, NextStep, Session};
