//! Upstream aggregation API client
//!
//! Wire-level client for the banking-aggregation provider. Every endpoint
//! answers JSON discriminated by a string `status` field; those responses
//! are modeled as per-endpoint sum types so the session state machine gets
//! exhaustiveness checking instead of stringly-typed branching.
//!
//! The observed `status` value set (`logged_in`, `select_client`,
//! `interaction_required`, `wrong_credentials`, `error`, `success`,
//! `logged_out`) is a contract and must be preserved exactly. A payload
//! outside it is an upstream-contract anomaly: logged in full, surfaced as a
//! generic error.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::adapters::executor::{self, RetryPolicy};
use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{AccountMovement, BankAccount, Provider};

const API_KEY_HEADER: &str = "X-API-Key";

/// Base backoff for the client-selection path, in milliseconds
const SELECT_CLIENT_BACKOFF_MS: u64 = 200;

/// Login request payload, submitted form-encoded
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub provider: String,
    pub username: String,
    pub password: String,
    /// Document type for providers that require it
    pub login_type: Option<String>,
    pub otp: Option<String>,
}

/// Login endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginReply {
    LoggedIn {
        key: String,
    },
    SelectClient {
        key: String,
    },
    InteractionRequired {
        #[serde(default)]
        field: Option<String>,
        #[serde(default)]
        key: Option<String>,
    },
    WrongCredentials {
        #[serde(default)]
        message: Option<String>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Logout endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogoutReply {
    LoggedOut,
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Client-list endpoint response shapes
///
/// The upstream returns clients as an id-to-name map; providers without
/// client selection return an empty or absent map.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClientsReply {
    Success {
        #[serde(default)]
        clients: Option<HashMap<String, String>>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Client-selection endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectClientReply {
    Success,
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Account-list endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountsReply {
    Success {
        #[serde(default)]
        accounts: Vec<BankAccount>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Movement-list endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MovementsReply {
    Success {
        #[serde(default)]
        movements: Vec<AccountMovement>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Entry in the flat provider list (no auth fields or capabilities yet)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderListItem {
    pub code: String,
    pub country: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Provider-list endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderListReply {
    Success {
        #[serde(default)]
        providers: Vec<ProviderListItem>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Provider-detail endpoint response shapes
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderDetailReply {
    Success { provider: Provider },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// HTTP client for the upstream aggregation API
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .query(query)
    }

    /// Fetch the flat provider list
    pub async fn list_providers(&self) -> Result<Vec<ProviderListItem>> {
        let response =
            executor::execute(|| self.get("/provider/", &[]), &RetryPolicy::default()).await?;

        match parse_reply::<ProviderListReply>(response, "provider list").await? {
            ProviderListReply::Success { providers } => Ok(providers),
            ProviderListReply::Error { message } => Err(map_error_message(message)),
        }
    }

    /// Fetch the detailed record for one provider
    pub async fn provider_details(&self, code: &str) -> Result<Provider> {
        let path = format!("/provider/{}/", code);
        let response =
            executor::execute(|| self.get(&path, &[]), &RetryPolicy::default()).await?;

        match parse_reply::<ProviderDetailReply>(response, "provider detail").await? {
            ProviderDetailReply::Success { provider } => Ok(provider),
            ProviderDetailReply::Error { message } => Err(map_error_message(message)),
        }
    }

    /// Submit the login form
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginReply> {
        let build = || {
            let mut form: Vec<(&str, &str)> = vec![
                ("provider", request.provider.as_str()),
                ("username", request.username.as_str()),
                ("password", request.password.as_str()),
            ];
            if let Some(login_type) = request.login_type.as_deref() {
                form.push(("type", login_type));
            }
            if let Some(otp) = request.otp.as_deref() {
                form.push(("otp", otp));
            }

            self.http
                .post(format!("{}/login/", self.base_url))
                .header(API_KEY_HEADER, &self.api_key)
                .header("Accept", "application/json")
                .form(&form)
        };

        let response = executor::execute(build, &RetryPolicy::default()).await?;
        parse_reply(response, "login").await
    }

    /// End the session; deliberately not retried
    ///
    /// A failed logout is non-fatal to the caller's flow and not worth
    /// masking with backoff noise.
    pub async fn logout(&self, key: &str) -> Result<LogoutReply> {
        let response = self.get("/logout/", &[("key", key)]).send().await?;
        parse_reply(response, "logout").await
    }

    /// List the clients reachable under the session
    pub async fn get_clients(&self, key: &str) -> Result<ClientsReply> {
        let response = executor::execute(
            || self.get("/client/", &[("key", key)]),
            &RetryPolicy::default(),
        )
        .await?;
        parse_reply(response, "client list").await
    }

    /// Bind the session to one client
    pub async fn select_client(&self, key: &str, client_id: &str) -> Result<SelectClientReply> {
        let path = format!("/client/{}/", client_id);
        let response = executor::execute(
            || self.get(&path, &[("key", key)]),
            &RetryPolicy::with_initial_backoff(SELECT_CLIENT_BACKOFF_MS),
        )
        .await?;
        parse_reply(response, "client selection").await
    }

    /// List the session's bank accounts
    pub async fn list_accounts(&self, key: &str) -> Result<AccountsReply> {
        let response = executor::execute(
            || self.get("/account/", &[("key", key)]),
            &RetryPolicy::default(),
        )
        .await?;
        parse_reply(response, "account list").await
    }

    /// List movements for one account, filtered by currency and date range
    pub async fn list_movements(
        &self,
        key: &str,
        account_number: &str,
        currency: &str,
        date_start: &str,
        date_end: &str,
    ) -> Result<MovementsReply> {
        let path = format!("/account/{}/movement/", account_number);
        let response = executor::execute(
            || {
                self.get(
                    &path,
                    &[
                        ("key", key),
                        ("currency", currency),
                        ("date_start", date_start),
                        ("date_end", date_end),
                    ],
                )
            },
            &RetryPolicy::default(),
        )
        .await?;
        parse_reply(response, "movement list").await
    }
}

/// Normalize an upstream `error` message into the domain taxonomy
///
/// "Invalid key" means the same thing on every endpoint, so it is mapped to
/// the one session-expired error callers branch on.
pub fn map_error_message(message: Option<String>) -> Error {
    match message.as_deref() {
        Some("Invalid key") => Error::SessionExpired,
        Some("wrong_client") => Error::WrongClient("selected client".to_string()),
        Some("Unauthorized provider") => Error::UnauthorizedProvider,
        Some(other) => {
            tracing::error!(message = other, "upstream reported an error");
            Error::upstream("something went wrong")
        }
        None => {
            tracing::error!("upstream reported an error with no message");
            Error::upstream("something went wrong")
        }
    }
}

/// Parse a response body into a typed reply, treating unknown shapes as
/// contract anomalies
async fn parse_reply<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<T>(&body) {
        Ok(reply) => Ok(reply),
        Err(err) => {
            // Full payload stays in the logs; callers only see a generic error
            tracing::error!(
                endpoint,
                http_status = %status,
                %err,
                payload = %body,
                "unexpected upstream response shape"
            );
            Err(Error::upstream("something went wrong"))
        }
    }
}
