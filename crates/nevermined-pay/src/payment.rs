use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayError;

/// Opaque identifier of a payable service (a DID on Nevermined).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Wrap a service identifier. Only emptiness is rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, PayError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PayError::InvalidServiceId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceId {
    type Error = PayError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative amount in the backend's smallest unit (wei-equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaymentAmount(u128);

impl PaymentAmount {
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> u128 {
        self.0
    }
}

impl FromStr for PaymentAmount {
    type Err = PayError;

    /// Accepts plain decimal digits only. Signs, decimals and blanks are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayError::InvalidAmount {
                input: s.to_string(),
            });
        }
        trimmed
            .parse::<u128>()
            .map(Self)
            .map_err(|_| PayError::InvalidAmount {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for PaymentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amounts travel as decimal strings so values above 2^53 survive JSON.
impl Serialize for PaymentAmount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PaymentAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Request body sent to the backend's pay-for-service route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePaymentRequest {
    pub service_did: ServiceId,
    pub amount: PaymentAmount,
}
