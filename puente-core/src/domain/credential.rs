//! Credential entities
//!
//! The plaintext credential payload never reaches storage; it is
//! JSON-encoded and ciphered first. `StoredCredential` mirrors the persisted
//! record shape: a provider/user pair with the encrypted blob.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Login credentials for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub provider: String,
    pub username: String,
    pub password: String,
    /// Provider-specific extra auth fields (document type, card number, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra_fields: HashMap<String, String>,
}

/// Persisted credential record
///
/// The blob format is `hex(iv) + base64(ciphertext)` and is a durable
/// contract; previously stored records must keep decrypting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub provider_name: String,
    pub user_id: i64,
    pub encrypted_credentials: String,
}
