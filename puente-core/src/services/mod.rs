//! Service layer
//!
//! Business logic on top of the domain and ports:
//! - Catalog: cached provider discovery with concurrent detail assembly
//! - Session: the multi-step login state machine and session operations
//! - Credentials: validation plus encryption of stored credentials
//! - Security: the AES-256-CBC cipher primitives

pub mod catalog;
pub mod credentials;
pub mod security;
pub mod session;

pub use catalog::CatalogService;
pub use credentials::CredentialService;
pub use session::SessionService;
