//! Session service - the multi-step login state machine
//!
//! Drives the upstream login protocol (credentials, then possibly client
//! selection or an OTP interaction, then a session key) and the
//! session-scoped operations. The state machine is a straight match over
//! the per-endpoint reply enums, so adding an upstream status without
//! handling it fails to compile instead of failing at 3 a.m.
//!
//! Login outcomes: `LoggedIn` and `Rejected` are terminal; `SelectClient`
//! and `InteractionRequired(otp)` are holding states the caller resolves
//! with a follow-up call carrying the issued session key.

use std::sync::Arc;

use crate::adapters::upstream::{
    map_error_message, AccountsReply, ClientsReply, LoginReply, LoginRequest, LogoutReply,
    MovementsReply, SelectClientReply, UpstreamClient,
};
use crate::domain::result::{Error, Result};
use crate::domain::{AccountMovement, BankAccount, Client, Session};
use crate::services::catalog::CatalogService;
use crate::validators;

pub struct SessionService {
    upstream: Arc<UpstreamClient>,
    catalog: Arc<CatalogService>,
}

impl SessionService {
    pub fn new(upstream: Arc<UpstreamClient>, catalog: Arc<CatalogService>) -> Self {
        Self { upstream, catalog }
    }

    /// Start a session against a provider
    pub async fn login(&self, request: LoginRequest) -> Result<Session> {
        validators::check_non_empty_string("provider", &request.provider, 3, 255)?;

        // The sandbox provider is not in the catalog; skip the whitelist
        // lookup so sandbox logins work even when the catalog is cold
        if request.provider != "test" {
            let valid = self.catalog.valid_provider_names().await?;
            validators::check_provider(&request.provider, &valid)?;
        }

        validators::check_non_empty_string("username", &request.username, 4, 255)?;
        validators::check_non_empty_string("password", &request.password, 4, 255)?;

        match self.upstream.login(&request).await? {
            LoginReply::LoggedIn { key } => Ok(Session::logged_in(key)),
            LoginReply::SelectClient { key } => {
                let clients = self.get_clients(&key).await?;
                Ok(Session::needs_client(key, clients))
            }
            LoginReply::InteractionRequired { field, key } => {
                self.interpret_interaction(field, key)
            }
            LoginReply::WrongCredentials { .. } => Err(Error::WrongCredentials),
            LoginReply::Error { message } => Err(map_error_message(message)),
        }
    }

    fn interpret_interaction(
        &self,
        field: Option<String>,
        key: Option<String>,
    ) -> Result<Session> {
        match (field.as_deref(), key) {
            (Some("otp"), Some(key)) => Ok(Session::needs_otp(key)),
            (Some("personal_questions"), _) => {
                Err(Error::UnsupportedInteraction("personal_questions".to_string()))
            }
            (field, _) => {
                tracing::error!(
                    field = field.unwrap_or("<missing>"),
                    "upstream requested an interaction outside the documented contract"
                );
                Err(Error::upstream("something went wrong"))
            }
        }
    }

    /// End the session
    pub async fn logout(&self, key: &str) -> Result<()> {
        validators::check_session_key(key)?;

        match self.upstream.logout(key).await? {
            LogoutReply::LoggedOut => Ok(()),
            LogoutReply::Error { message } => Err(map_error_message(message)),
        }
    }

    /// List the clients reachable under the session
    ///
    /// Providers without client selection answer with an empty or absent
    /// map; that is an empty list, not an error.
    pub async fn get_clients(&self, key: &str) -> Result<Vec<Client>> {
        validators::check_session_key(key)?;

        match self.upstream.get_clients(key).await? {
            ClientsReply::Success { clients } => {
                let mut clients: Vec<Client> = clients
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(id, name)| Client { id, name })
                    .collect();
                clients.sort_by(|a, b| a.id.cmp(&b.id));
                Ok(clients)
            }
            ClientsReply::Error { message } => Err(map_error_message(message)),
        }
    }

    /// Bind the session to one client
    ///
    /// The client must be a member of the freshly fetched client list; the
    /// check runs before any upstream mutation.
    pub async fn select_client(&self, key: &str, client_id: &str) -> Result<()> {
        validators::check_session_key(key)?;

        let clients = self.get_clients(key).await?;
        validators::check_client_membership(client_id, &clients)?;

        match self.upstream.select_client(key, client_id).await? {
            SelectClientReply::Success => Ok(()),
            SelectClientReply::Error { message } => match message.as_deref() {
                Some("wrong_client") => Err(Error::WrongClient(client_id.to_string())),
                _ => Err(map_error_message(message)),
            },
        }
    }

    /// List the session's bank accounts
    pub async fn list_accounts(&self, key: &str) -> Result<Vec<BankAccount>> {
        validators::check_session_key(key)?;

        match self.upstream.list_accounts(key).await? {
            AccountsReply::Success { accounts } => Ok(accounts),
            AccountsReply::Error { message } => Err(map_error_message(message)),
        }
    }

    /// List movements for one account within a currency and date range
    pub async fn list_movements(
        &self,
        key: &str,
        account_number: &str,
        currency: &str,
        date_start: &str,
        date_end: &str,
    ) -> Result<Vec<AccountMovement>> {
        validators::check_session_key(key)?;
        validators::check_non_empty_string("account", account_number, 1, 255)?;
        validators::check_currency(currency)?;
        validators::check_date("date_start", date_start)?;
        validators::check_date("date_end", date_end)?;

        match self
            .upstream
            .list_movements(key, account_number, currency, date_start, date_end)
            .await?
        {
            MovementsReply::Success { movements } => Ok(movements),
            MovementsReply::Error { message } => Err(map_error_message(message)),
        }
    }
}
