//! Bank account and movement entities
//!
//! Read-only views fetched per request from the upstream session endpoints.
//! The upstream is not consistent about numeric wire types (amounts arrive
//! as numbers or strings depending on the bank), so amounts are decoded
//! through tolerant deserializers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A bank account reachable in the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub branch: Option<String>,
    pub currency: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: Decimal,
}

/// One account movement inside a currency/date-range query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMovement {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub date: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub debit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub credit: Option<Decimal>,
    /// Provider-specific extra data, passed through opaquely
    #[serde(default)]
    pub extra_data: Option<JsonValue>,
}

/// Deserialize an ID that can be number or string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize an amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    decimal_from_value(value).map_err(D::Error::custom)
}

/// Deserialize an optional amount; null, absent and empty string all mean none
fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => decimal_from_value(v).map(Some).map_err(D::Error::custom),
    }
}

fn decimal_from_value(value: JsonValue) -> std::result::Result<Decimal, String> {
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid decimal: {}", e)),
        JsonValue::String(s) => s
            .parse::<Decimal>()
            .map_err(|e| format!("invalid decimal: {}", e)),
        _ => Err("expected number or string for amount".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_balance_from_number() {
        let json = r#"{
            "id": "acc-1",
            "name": "Cuenta Sueldo",
            "number": "193-1234567-0-11",
            "branch": "0193",
            "currency": "PEN",
            "balance": 1250.75
        }"#;

        let account: BankAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance.to_string(), "1250.75");
    }

    #[test]
    fn test_account_balance_from_string() {
        let json = r#"{
            "id": "acc-2",
            "name": "Savings",
            "number": "194-7654321-0-22",
            "currency": "USD",
            "balance": "300.10"
        }"#;

        let account: BankAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance.to_string(), "300.10");
        assert!(account.branch.is_none());
    }

    #[test]
    fn test_movement_mixed_amount_types() {
        let json = r#"{
            "id": 991,
            "reference": "TRF-0042",
            "date": "15/01/2024",
            "detail": "transferencia recibida",
            "debit": "",
            "credit": 450.00,
            "extra_data": { "channel": "web" }
        }"#;

        let movement: AccountMovement = serde_json::from_str(json).unwrap();
        assert_eq!(movement.id, "991");
        assert!(movement.debit.is_none());
        assert_eq!(movement.credit.unwrap().to_string(), "450.00");
        assert!(movement.extra_data.is_some());
    }

    #[test]
    fn test_movement_absent_amounts() {
        let json = r#"{ "id": "m-1", "date": "01/02/2024" }"#;
        let movement: AccountMovement = serde_json::from_str(json).unwrap();
        assert!(movement.debit.is_none());
        assert!(movement.credit.is_none());
        assert!(movement.extra_data.is_none());
    }
}
