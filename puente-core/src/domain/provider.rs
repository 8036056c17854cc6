//! Provider (supplier) catalog entities
//!
//! A provider describes one upstream bank: which credential fields it
//! requires beyond username/password, and which operations it supports.
//! Providers are immutable once fetched and are only ever sourced from the
//! upstream catalog endpoints.

use serde::{Deserialize, Serialize};

/// One selectable value of a choice auth field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    #[serde(default)]
    pub label_es: Option<String>,
    #[serde(default)]
    pub label_en: Option<String>,
}

/// One credential input a provider requires beyond username/password
///
/// The upstream discriminates these on the `type` field. A `choice` field
/// constrains the accepted value to its named choice set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthField {
    Text {
        name: String,
        #[serde(default)]
        interactive: bool,
        #[serde(default)]
        optional: bool,
        #[serde(default)]
        label_es: Option<String>,
        #[serde(default)]
        label_en: Option<String>,
    },
    Password {
        name: String,
        #[serde(default)]
        interactive: bool,
        #[serde(default)]
        optional: bool,
        #[serde(default)]
        label_es: Option<String>,
        #[serde(default)]
        label_en: Option<String>,
    },
    Choice {
        name: String,
        #[serde(default)]
        interactive: bool,
        #[serde(default)]
        optional: bool,
        #[serde(default)]
        label_es: Option<String>,
        #[serde(default)]
        label_en: Option<String>,
        #[serde(default)]
        choices: Vec<Choice>,
    },
}

impl AuthField {
    /// Field name as submitted in the login payload
    pub fn name(&self) -> &str {
        match self {
            AuthField::Text { name, .. }
            | AuthField::Password { name, .. }
            | AuthField::Choice { name, .. } => name,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            AuthField::Text { optional, .. }
            | AuthField::Password { optional, .. }
            | AuthField::Choice { optional, .. } => *optional,
        }
    }

    /// Accepted values for a choice field, empty for text/password
    pub fn choice_names(&self) -> Vec<&str> {
        match self {
            AuthField::Choice { choices, .. } => {
                choices.iter().map(|c| c.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Bank behind a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankMetadata {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Account type a provider can expose (e.g. checking, savings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountType {
    pub name: String,
    #[serde(default)]
    pub label_es: Option<String>,
    #[serde(default)]
    pub label_en: Option<String>,
}

/// Capability flags reported per provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderMethods {
    #[serde(default)]
    pub accounts: bool,
    #[serde(default)]
    pub credit_cards: bool,
    #[serde(default)]
    pub account_movements: bool,
    #[serde(default)]
    pub credit_card_movements: bool,
    #[serde(default)]
    pub personal_info: bool,
    #[serde(default)]
    pub transfers: bool,
    #[serde(default)]
    pub enrollments: bool,
}

/// Detailed provider record from the upstream catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub country: String,
    #[serde(default)]
    pub auth_fields: Vec<AuthField>,
    #[serde(default)]
    pub account_type: Vec<AccountType>,
    #[serde(default)]
    pub logo: Option<String>,
    pub bank: BankMetadata,
    #[serde(default)]
    pub methods: ProviderMethods,
}

impl Provider {
    /// Look up an auth field by its submitted name
    pub fn auth_field(&self, name: &str) -> Option<&AuthField> {
        self.auth_fields.iter().find(|f| f.name() == name)
    }
}
