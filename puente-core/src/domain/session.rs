//! Session entities
//!
//! A session lives entirely upstream; the opaque 32-character key is the
//! sole token of identity this system holds. The `requires` marker tells the
//! caller which follow-up step (if any) the login protocol still needs.

use serde::{Deserialize, Serialize};

/// Follow-up step the caller must resolve before the session is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Nothing,
    SpecifyClient,
    OtpCode,
    AnswerQuestion,
}

/// One of possibly several account holders reachable under a single login
///
/// Joint accounts commonly expose more than one client; the caller selects
/// exactly one per session before account operations are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
}

/// An authenticated upstream session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque fixed-length session key issued by the upstream
    pub key: String,
    pub requires: NextStep,
    /// Present only when `requires` is `specify_client`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
}

impl Session {
    /// A fully logged-in session with no pending step
    pub fn logged_in(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            requires: NextStep::Nothing,
            clients: None,
        }
    }

    /// A session held until the caller selects a client
    pub fn needs_client(key: impl Into<String>, clients: Vec<Client>) -> Self {
        Self {
            key: key.into(),
            requires: NextStep::SpecifyClient,
            clients: Some(clients),
        }
    }

    /// A session held until the caller supplies an OTP code
    pub fn needs_otp(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            requires: NextStep::OtpCode,
            clients: None,
        }
    }
}
