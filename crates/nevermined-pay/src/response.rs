use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single `pay_for_service` call.
///
/// `Display` renders the string contract consumed by the orchestration layer:
/// `Payment successful, Agreement ID: <id>` or `Payment failed: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PaymentResult {
    #[serde(rename_all = "camelCase")]
    Success { agreement_id: String },
    Failure { message: String },
}

impl PaymentResult {
    pub fn success(agreement_id: impl Into<String>) -> Self {
        Self::Success {
            agreement_id: agreement_id.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn agreement_id(&self) -> Option<&str> {
        match self {
            Self::Success { agreement_id } => Some(agreement_id),
            Self::Failure { .. } => None,
        }
    }
}

impl fmt::Display for PaymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { agreement_id } => {
                write!(f, "Payment successful, Agreement ID: {agreement_id}")
            }
            Self::Failure { message } => write!(f, "Payment failed: {message}"),
        }
    }
}

/// Body returned by the backend when a payment is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReceipt {
    #[serde(default, alias = "agreement_id", skip_serializing_if = "Option::is_none")]
    pub agreement_id: Option<String>,
}

impl BackendReceipt {
    pub fn with_agreement(id: impl Into<String>) -> Self {
        Self {
            agreement_id: Some(id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contract() {
        assert_eq!(
            PaymentResult::success("test_agreement_id").to_string(),
            "Payment successful, Agreement ID: test_agreement_id"
        );
        assert_eq!(
            PaymentResult::failure("Payment failed").to_string(),
            "Payment failed: Payment failed"
        );
    }

    #[test]
    fn test_accessors() {
        let ok = PaymentResult::success("X");
        assert!(ok.is_success());
        assert_eq!(ok.agreement_id(), Some("X"));

        let err = PaymentResult::failure("nope");
        assert!(!err.is_success());
        assert_eq!(err.agreement_id(), None);
    }

    #[test]
    fn test_result_json_is_tagged() {
        let json = serde_json::to_value(PaymentResult::success("abc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "success", "agreementId": "abc" })
        );
    }

    #[test]
    fn test_receipt_accepts_both_field_spellings() {
        let camel: BackendReceipt = serde_json::from_str(r#"{"agreementId":"a1"}"#).unwrap();
        let snake: BackendReceipt = serde_json::from_str(r#"{"agreement_id":"a2"}"#).unwrap();
        let none: BackendReceipt = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(camel.agreement_id.as_deref(), Some("a1"));
        assert_eq!(snake.agreement_id.as_deref(), Some("a2"));
        assert_eq!(none.agreement_id, None);
    }
}
