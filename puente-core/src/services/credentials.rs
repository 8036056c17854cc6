//! Credential vault service
//!
//! Turns a [`Credentials`] payload into the durable encrypted blob and back.
//! Credentials are JSON-encoded before ciphering so provider-specific extra
//! fields survive without schema changes on the stored side.

use crate::domain::result::Result;
use crate::domain::Credentials;
use crate::services::security;
use crate::validators;

pub struct CredentialService {
    encryption_key: String,
}

impl CredentialService {
    pub fn new(encryption_key: impl Into<String>) -> Self {
        Self {
            encryption_key: encryption_key.into(),
        }
    }

    /// Validate and encrypt credentials into the stored blob format
    pub fn encrypt_credentials(&self, credentials: &Credentials) -> Result<String> {
        validators::check_non_empty_string("provider", &credentials.provider, 3, 255)?;
        validators::check_non_empty_string("username", &credentials.username, 4, 255)?;
        validators::check_non_empty_string("password", &credentials.password, 4, 255)?;

        let plaintext = serde_json::to_string(credentials)?;
        security::encrypt_aes256(&plaintext, &self.encryption_key)
    }

    /// Decrypt a stored blob back into credentials
    pub fn decrypt_credentials(&self, blob: &str) -> Result<Credentials> {
        let plaintext = security::decrypt_aes256(blob, &self.encryption_key)?;
        Ok(serde_json::from_str(&plaintext)?)
    }
}
