//! Tool definitions: the capabilities agents can invoke by name.

use std::sync::Arc;
use std::time::Instant;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use nvm_pay::{NeverminedClient, PaymentBackend, PaymentGateway};

use crate::error::CrewError;

/// Registered name of the payment tool.
pub const PAYMENT_TOOL_NAME: &str = "nevermined_payment";

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Text handed back to the calling agent.
    pub output: String,
    pub success: bool,
    pub duration_ms: u64,
    /// Structured form of `output`, when the tool has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A single declaration describing a tool to an agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A named capability with a typed JSON signature.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments accepted by [`Tool::call`].
    fn parameters(&self) -> serde_json::Value;

    fn call<'a>(&'a self, args: &'a serde_json::Value)
        -> BoxFuture<'a, Result<ToolResult, CrewError>>;

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Pays for a service through a [`PaymentGateway`].
///
/// Output is the gateway's string contract, e.g.
/// `Payment successful, Agreement ID: 0x…` or `Payment failed: insufficient funds`.
pub struct PaymentTool<B = NeverminedClient> {
    gateway: Arc<PaymentGateway<B>>,
}

impl<B: PaymentBackend> PaymentTool<B> {
    pub fn new(gateway: Arc<PaymentGateway<B>>) -> Self {
        Self { gateway }
    }
}

impl<B: PaymentBackend> Tool for PaymentTool<B> {
    fn name(&self) -> &str {
        PAYMENT_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Handles payments via the Nevermined protocol. Pays `payment_amount` (in wei) \
         for the service identified by `service_did` and returns a confirmation with \
         the agreement ID."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "service_did": {
                    "type": "string",
                    "description": "The DID of the service to pay for"
                },
                "payment_amount": {
                    "type": "string",
                    "description": "The amount to pay (in wei)"
                }
            },
            "required": ["service_did", "payment_amount"]
        })
    }

    fn call<'a>(
        &'a self,
        args: &'a serde_json::Value,
    ) -> BoxFuture<'a, Result<ToolResult, CrewError>> {
        Box::pin(self.pay(args))
    }
}

impl<B: PaymentBackend> PaymentTool<B> {
    async fn pay(&self, args: &serde_json::Value) -> Result<ToolResult, CrewError> {
        let start = Instant::now();

        let service_did = args
            .get("service_did")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CrewError::InvalidArguments("missing 'service_did'".to_string()))?;

        // Amounts may arrive as strings or as JSON integers.
        let payment_amount = match args.get("payment_amount") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(CrewError::InvalidArguments(format!(
                    "'payment_amount' must be a string or integer, got {other}"
                )))
            }
            None => {
                return Err(CrewError::InvalidArguments(
                    "missing 'payment_amount'".to_string(),
                ))
            }
        };

        let result = self
            .gateway
            .pay_for_service(service_did, &payment_amount)
            .await;

        Ok(ToolResult {
            output: result.to_string(),
            success: result.is_success(),
            duration_ms: start.elapsed().as_millis() as u64,
            data: Some(serde_json::to_value(&result)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvm_pay::Environment;

    fn mock_tool() -> PaymentTool {
        PaymentTool::new(Arc::new(PaymentGateway::mock(Environment::Testing)))
    }

    #[tokio::test]
    async fn test_payment_tool_mock_success() {
        let tool = mock_tool();
        let result = tool
            .call(&serde_json::json!({ "service_did": "did:nv:1", "payment_amount": "1000" }))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result
            .output
            .starts_with("Payment successful, Agreement ID: 0x"));
        assert_eq!(result.data.unwrap()["status"], "success");
    }

    #[tokio::test]
    async fn test_payment_tool_accepts_integer_amount() {
        let tool = mock_tool();
        let result = tool
            .call(&serde_json::json!({ "service_did": "did:nv:1", "payment_amount": 1000 }))
            .await
            .unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_payment_tool_invalid_amount_is_failed_payment() {
        let tool = mock_tool();
        let result = tool
            .call(&serde_json::json!({ "service_did": "did:nv:1", "payment_amount": "abc" }))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.output, "Payment failed: invalid amount");
    }

    #[tokio::test]
    async fn test_payment_tool_missing_arguments() {
        let tool = mock_tool();
        for args in [
            serde_json::json!({ "payment_amount": "1" }),
            serde_json::json!({ "service_did": "did:nv:1" }),
            serde_json::json!({ "service_did": "did:nv:1", "payment_amount": [1] }),
        ] {
            assert!(matches!(
                tool.call(&args).await,
                Err(CrewError::InvalidArguments(_))
            ));
        }
    }

    #[test]
    fn test_declaration() {
        let decl = mock_tool().declaration();
        assert_eq!(decl.name, PAYMENT_TOOL_NAME);
        assert_eq!(
            decl.parameters["required"],
            serde_json::json!(["service_did", "payment_amount"])
        );
    }
}
