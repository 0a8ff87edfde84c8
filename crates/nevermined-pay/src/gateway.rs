//! The payment gateway: one total operation over a live or mock backend.

use std::time::{Duration, Instant};

use crate::backend::PaymentBackend;
use crate::client::NeverminedClient;
use crate::config::GatewayConfig;
use crate::constants::{DEFAULT_TIMEOUT_SECS, UNKNOWN_AGREEMENT_ID};
use crate::environment::Environment;
use crate::error::{BackendError, PayError};
use crate::mock::mock_agreement_id;
use crate::payment::{PaymentAmount, ServiceId};
use crate::response::PaymentResult;

/// Live or mock, fixed when the gateway is built.
enum Mode<B> {
    Live(B),
    Mock,
}

/// Pays for services through a backend and always answers with a [`PaymentResult`].
///
/// Built with an API key the gateway is *live* and forwards every payment to
/// its backend. Built without one it is in *mock* mode for its whole lifetime:
/// no backend exists and every valid payment succeeds with a synthesized
/// agreement id.
pub struct PaymentGateway<B = NeverminedClient> {
    mode: Mode<B>,
    environment: Environment,
    timeout: Duration,
}

impl PaymentGateway<NeverminedClient> {
    /// Build a gateway from configuration.
    ///
    /// Fails if the environment name is unknown or the backend URL override is
    /// malformed. The environment is resolved in mock mode too.
    pub fn new(config: &GatewayConfig) -> Result<Self, PayError> {
        let environment = config.resolve_environment()?;
        let timeout = config.timeout();

        let gateway = match &config.api_key {
            Some(api_key) => {
                let base_url = config.resolve_backend_url()?;
                let client = NeverminedClient::new(api_key.clone(), base_url, timeout)?;
                tracing::info!(
                    environment = %environment,
                    backend = %client.base_url(),
                    production = environment.is_production(),
                    timeout_secs = timeout.as_secs(),
                    "Payment gateway live"
                );
                Self::live(client, environment)
            }
            None => {
                tracing::info!(
                    environment = %environment,
                    "No Nevermined API key, payment gateway running in mock mode"
                );
                Self::mock(environment)
            }
        };

        Ok(gateway.with_timeout(timeout))
    }
}

impl<B: PaymentBackend> PaymentGateway<B> {
    /// A live gateway paying through `backend`.
    pub fn live(backend: B, environment: Environment) -> Self {
        Self {
            mode: Mode::Live(backend),
            environment,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// A mock gateway that never contacts a backend.
    pub fn mock(environment: Environment) -> Self {
        Self {
            mode: Mode::Mock,
            environment,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Bound each backend call. Expiry is reported as a failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, Mode::Mock)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pay `amount` (a non-negative integer string) for `service_id`.
    ///
    /// Never panics and never returns an error: invalid input, backend
    /// failures and timeouts all come back as [`PaymentResult::Failure`].
    /// Input is validated before any backend is contacted.
    pub async fn pay_for_service(&self, service_id: &str, amount: &str) -> PaymentResult {
        let mode = if self.is_mock() { "mock" } else { "live" };
        let start = Instant::now();

        match self.try_pay(service_id, amount).await {
            Ok(agreement_id) => {
                tracing::info!(
                    service_id,
                    amount,
                    mode,
                    agreement_id = %agreement_id,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Payment successful"
                );
                PaymentResult::Success { agreement_id }
            }
            Err(e) => {
                tracing::warn!(
                    service_id,
                    amount,
                    mode,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Payment failed"
                );
                PaymentResult::Failure {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn try_pay(&self, service_id: &str, amount: &str) -> Result<String, PayError> {
        let amount: PaymentAmount = amount.parse()?;
        let service_id = ServiceId::new(service_id)?;

        let backend = match &self.mode {
            Mode::Mock => {
                let agreement_id = mock_agreement_id();
                tracing::debug!(service_id = %service_id, %amount, "Synthesized mock agreement");
                return Ok(agreement_id);
            }
            Mode::Live(backend) => backend,
        };

        let timed_out = || PayError::Timeout {
            ms: self.timeout.as_millis() as u64,
        };
        let receipt = tokio::time::timeout(self.timeout, backend.pay_for_service(&service_id, amount))
            .await
            .map_err(|_| timed_out())?
            .map_err(|e| match e {
                BackendError::TimedOut(_) => timed_out(),
                other => PayError::Backend(other),
            })?;

        Ok(receipt
            .agreement_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNKNOWN_AGREEMENT_ID.to_string()))
    }
}

impl<B> std::fmt::Debug for PaymentGateway<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGateway")
            .field("mode", &if matches!(self.mode, Mode::Mock) { "mock" } else { "live" })
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}
