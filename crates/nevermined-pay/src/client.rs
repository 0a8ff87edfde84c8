use std::time::Duration;

use crate::backend::PaymentBackend;
use crate::constants::PAY_FOR_SERVICE_PATH;
use crate::error::{BackendError, ConfigError};
use crate::payment::{PaymentAmount, ServiceId, ServicePaymentRequest};
use crate::response::BackendReceipt;

/// Longest slice of an unrecognised error body kept in [`BackendError::HttpStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Slack between the caller's deadline and the HTTP client's own.
const CLIENT_TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// HTTP client for the Nevermined payments backend.
///
/// Sends `POST {base_url}/api/v1/payments/service` with bearer auth and a JSON
/// body of `{"serviceDid", "amount"}`. No retries: each call is one payment attempt.
pub struct NeverminedClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NeverminedClient {
    /// Build a client for `base_url`.
    ///
    /// `timeout` is the caller's per-payment deadline. The HTTP client's own
    /// deadline sits a few seconds beyond it, so a gateway bounding
    /// the call with the same `timeout` always expires first.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout + CLIENT_TIMEOUT_GRACE)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "http client",
                reason: e.to_string(),
            })?;
        Ok(Self::with_http_client(api_key, base_url, http))
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for NeverminedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeverminedClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PaymentBackend for NeverminedClient {
    async fn pay_for_service(
        &self,
        service_id: &ServiceId,
        amount: PaymentAmount,
    ) -> Result<BackendReceipt, BackendError> {
        let url = format!("{}{}", self.base_url, PAY_FOR_SERVICE_PATH);
        let body = ServicePaymentRequest {
            service_did: service_id.clone(),
            amount,
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &text));
        }

        parse_receipt(&text)
    }
}

/// Classify a reqwest failure, keeping its whole source chain in the message.
fn transport(e: reqwest::Error) -> BackendError {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    if e.is_timeout() {
        BackendError::TimedOut(message)
    } else {
        BackendError::Transport(message)
    }
}

/// Parse a 2xx body. An empty body is a confirmation without an agreement id.
fn parse_receipt(body: &str) -> Result<BackendReceipt, BackendError> {
    if body.trim().is_empty() {
        return Ok(BackendReceipt::default());
    }
    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Map a non-2xx response to an error, preferring the backend's own message.
fn rejection(status: u16, body: &str) -> BackendError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| error_message(&json));

    match message {
        Some(message) => BackendError::Rejected(message),
        None => BackendError::HttpStatus {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        },
    }
}

/// Find the error text in `{"message": ..}`, `{"error": ..}` or `{"error": {"message": ..}}`.
fn error_message(json: &serde_json::Value) -> Option<String> {
    let text = |v: &serde_json::Value| {
        v.as_str()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    json.get("message")
        .and_then(text)
        .or_else(|| json.get("error").and_then(text))
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(text)
        })
}
