use thiserror::Error;

/// Errors returned by gateway construction and the steps of a payment.
///
/// Only [`PayError::Config`] escapes to callers; everything else is folded
/// into a [`PaymentResult::Failure`](crate::PaymentResult) by the gateway.
#[derive(Debug, Error)]
pub enum PayError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid amount")]
    InvalidAmount { input: String },

    #[error("invalid service id: must not be empty")]
    InvalidServiceId,

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("payment timed out after {ms}ms")]
    Timeout { ms: u64 },
}

/// Configuration problems detected while building a gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures reported by (or while reaching) the payment backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend refused the payment. The message is the backend's own text.
    #[error("{0}")]
    Rejected(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    /// The HTTP client's own deadline expired before the backend answered.
    #[error("request timed out: {0}")]
    TimedOut(String),

    #[error("malformed response: {0}")]
    Decode(String),
}
