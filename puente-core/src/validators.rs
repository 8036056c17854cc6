//! Input validators
//!
//! Pure structural and semantic checks on payloads crossing into the
//! services. No I/O; each check returns `Ok(())` or a validation error
//! carrying the field name and a human-readable reason.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::result::{Error, Result};
use crate::domain::Client;

/// Upstream session keys are exactly 32 characters
pub const SESSION_KEY_LEN: usize = 32;

/// Upstream movement queries expect `dd/MM/yyyy`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Z]{3}$").expect("valid currency pattern"))
}

/// Check a required string field against length bounds
pub fn check_non_empty_string(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, "is required"));
    }

    if min == max && value.chars().count() != min {
        return Err(Error::validation(
            field,
            format!("must be exactly {} characters long", min),
        ));
    }

    if value.chars().count() < min {
        return Err(Error::validation(
            field,
            format!("must be at least {} characters long", min),
        ));
    }

    if value.chars().count() > max {
        return Err(Error::validation(
            field,
            format!("must be at most {} characters long", max),
        ));
    }

    Ok(())
}

/// Check the shape of an upstream session key
pub fn check_session_key(key: &str) -> Result<()> {
    check_non_empty_string("key", key, SESSION_KEY_LEN, SESSION_KEY_LEN)
}

/// Check a currency code against ISO-4217 shape (three uppercase letters)
pub fn check_currency(currency: &str) -> Result<()> {
    check_non_empty_string("currency", currency, 3, 3)?;

    if !currency_pattern().is_match(currency) {
        return Err(Error::validation(
            "currency",
            "must be a three-letter uppercase currency code",
        ));
    }

    Ok(())
}

/// Check a date string against the upstream `dd/MM/yyyy` format
pub fn check_date(field: &str, value: &str) -> Result<()> {
    check_non_empty_string(field, value, 10, 10)?;

    if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
        return Err(Error::validation(field, "must be a date in dd/MM/yyyy format"));
    }

    Ok(())
}

/// Check that a provider name is in the catalog whitelist
///
/// The literal `"test"` sandbox provider bypasses the membership check.
pub fn check_provider(provider: &str, valid_providers: &[String]) -> Result<()> {
    check_non_empty_string("provider", provider, 3, 255)?;

    if provider != "test" && !valid_providers.iter().any(|p| p == provider) {
        return Err(Error::validation("provider", "is not a valid provider"));
    }

    Ok(())
}

/// Check that the requested client id is present in the session's client list
pub fn check_client_membership(client_id: &str, clients: &[Client]) -> Result<()> {
    check_non_empty_string("client", client_id, 1, 255)?;

    if !clients.iter().any(|c| c.id == client_id) {
        return Err(Error::WrongClient(client_id.to_string()));
    }

    Ok(())
}
