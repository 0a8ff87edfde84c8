//! Service payments over the Nevermined protocol.
//!
//! A [`PaymentGateway`] pays for a DID-identified service before that service
//! runs and turns every outcome into a [`PaymentResult`] value:
//!
//! - **Live**: built with an API key; forwards each payment to a
//!   [`PaymentBackend`] (by default the [`NeverminedClient`] HTTP client).
//! - **Mock**: built without an API key; never contacts a backend and
//!   confirms every valid payment with a synthesized agreement id.
//!
//! # Quick example
//!
//! ```no_run
//! use nvm_pay::{GatewayConfig, PaymentGateway};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), nvm_pay::PayError> {
//! let gateway = PaymentGateway::new(&GatewayConfig::from_env())?;
//! let result = gateway.pay_for_service("did:nv:1234", "1000").await;
//! println!("{result}"); // "Payment successful, Agreement ID: ..."
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod payment;
pub mod response;

pub use backend::PaymentBackend;
pub use client::NeverminedClient;
pub use config::GatewayConfig;
pub use constants::*;
pub use environment::Environment;
pub use error::{BackendError, ConfigError, PayError};
pub use gateway::PaymentGateway;
pub use mock::{is_mock_agreement_id, mock_agreement_id};
pub use payment::{PaymentAmount, ServiceId, ServicePaymentRequest};
pub use response::{BackendReceipt, PaymentResult};
