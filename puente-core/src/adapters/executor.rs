//! Resilient request executor
//!
//! Wraps outbound HTTP calls with bounded exponential-backoff retry on the
//! upstream's transient-overload signal (502 Bad Gateway). Every upstream
//! call in this crate goes through [`execute`].
//!
//! Only the transient status is retried. Any other non-success status is
//! returned to the caller as upstream-reported data, because the parsed body
//! decides the domain-level meaning (wrong credentials vs. expired session
//! vs. unknown provider). Network-level failures below the HTTP layer
//! propagate unchanged.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

use crate::domain::result::{Error, Result};

/// Default retry cap per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff ceiling in milliseconds
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 3000;

/// Default initial backoff in milliseconds (doubles each attempt)
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;

/// Retry policy for one upstream call site
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// Override the initial backoff, keeping the default caps
    pub fn with_initial_backoff(ms: u64) -> Self {
        Self {
            initial_backoff: Duration::from_millis(ms),
            ..Self::default()
        }
    }
}

/// Whether a status is the transient upstream-overload signal
fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::BAD_GATEWAY
}

/// Execute a request with retry on transient upstream failures
///
/// `build` is invoked once per attempt because a `RequestBuilder` is
/// consumed on send. Exhausting `max_attempts` yields
/// [`Error::DeadlineExceeded`]; this is fatal to the caller's request, not
/// to the process.
pub async fn execute<F>(build: F, policy: &RetryPolicy) -> Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let mut backoff = policy.initial_backoff;

    for attempt in 1..=policy.max_attempts {
        let response = build().send().await?;

        if !is_transient(response.status()) {
            if attempt > 1 {
                tracing::debug!(attempt, "upstream call succeeded after retries");
            }
            return Ok(response);
        }

        if attempt == policy.max_attempts {
            tracing::warn!(
                attempts = policy.max_attempts,
                "upstream still overloaded, giving up"
            );
            return Err(Error::DeadlineExceeded(policy.max_attempts));
        }

        // Never log request bodies here; they can contain credentials
        tracing::warn!(
            status = %response.status(),
            attempt,
            backoff_ms = backoff.as_millis() as u64,
            "transient upstream failure, retrying"
        );

        tokio::time::sleep(backoff).await;
        backoff = std::cmp::min(backoff * 2, policy.max_backoff);
    }

    // max_attempts >= 1 is enforced by construction; the loop always returns
    Err(Error::DeadlineExceeded(policy.max_attempts))
}
