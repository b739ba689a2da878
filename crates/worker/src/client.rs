//! HTTP client for the matching API.
//!
//! [`HttpMatchInvoker`] posts a [`MatchRequest`] to `/api/v1/matching/run`
//! with a Bearer token. Non-2xx answers become [`InvokeError::Api`] carrying
//! the server's `error` message when one is present.

use std::time::Duration;

use async_trait::async_trait;
use curio_core::request::{MatchRequest, MatchRequestBody};
use serde::Deserialize;

/// Path of the orchestrator endpoint relative to the API base URL.
pub const MATCHING_RUN_PATH: &str = "/api/v1/matching/run";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for orchestrator invocation failures.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The matching API answered with a non-2xx status.
    #[error("Matching API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl InvokeError {
    /// Whether the same request may succeed later.
    ///
    /// Transport errors, 408, 429 and 5xx are retryable. Other 4xx answers
    /// will not change on retry. That includes 401: the token is read once
    /// at startup, so a rejected token stays rejected until a restart.
    pub fn is_retryable(&self) -> bool {
        match self {
            InvokeError::Request(_) => true,
            InvokeError::Api { status, .. } => {
                matches!(*status, 408 | 429) || *status >= 500
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invoker
// ---------------------------------------------------------------------------

/// Summary returned by a successful matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeOutcome {
    pub success: bool,
    pub matches_created: usize,
}

/// Runs one matching pass on behalf of a job.
#[async_trait]
pub trait MatchInvoker: Send + Sync {
    async fn invoke(&self, request: MatchRequest) -> Result<InvokeOutcome, InvokeError>;
}

/// [`MatchInvoker`] that calls the matching API over HTTP.
pub struct HttpMatchInvoker {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpMatchInvoker {
    /// Build an invoker for the API at `base_url`.
    ///
    /// `timeout` bounds each call; `None` leaves calls unbounded.
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: run_url(base_url),
            token: token.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MatchInvoker for HttpMatchInvoker {
    async fn invoke(&self, request: MatchRequest) -> Result<InvokeOutcome, InvokeError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&MatchRequestBody::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InvokeError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(response.json::<InvokeOutcome>().await?)
    }
}

fn run_url(base_url: &str) -> String {
    format!("{}{MATCHING_RUN_PATH}", base_url.trim_end_matches('/'))
}

/// The `error` field of a JSON error body, or the raw body otherwise.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> InvokeError {
        InvokeError::Api {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn run_url_joins_base_without_double_slash() {
        assert_eq!(
            run_url("http://localhost:3000/"),
            "http://localhost:3000/api/v1/matching/run"
        );
        assert_eq!(
            run_url("https://api.example.test"),
            "https://api.example.test/api/v1/matching/run"
        );
    }

    #[test]
    fn server_and_throttling_errors_are_retryable() {
        for status in [408, 429, 500, 502, 503] {
            assert!(api(status).is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn client_errors_are_permanent() {
        for status in [400, 401, 403, 404, 409, 422] {
            assert!(!api(status).is_retryable(), "{status} should be permanent");
        }
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(
            api_error_message(r#"{"error":"WishlistItem with id 4 not found","code":"NOT_FOUND"}"#),
            "WishlistItem with id 4 not found"
        );
        assert_eq!(api_error_message("  Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn api_error_display_includes_status_and_message() {
        let err = InvokeError::Api {
            status: 404,
            message: "MarketplaceListing with id 9 not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Matching API returned HTTP 404: MarketplaceListing with id 9 not found"
        );
    }

    #[test]
    fn invoker_builds_with_and_without_timeout() {
        let invoker = HttpMatchInvoker::new("http://localhost:3000", "token", None).unwrap();
        assert_eq!(invoker.url(), "http://localhost:3000/api/v1/matching/run");
        assert!(HttpMatchInvoker::new(
            "http://localhost:3000",
            "token",
            Some(Duration::from_secs(5))
        )
        .is_ok());
    }
}
