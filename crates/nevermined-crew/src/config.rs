//! Crew configuration from environment variables.

use nvm_pay::GatewayConfig;

use crate::error::CrewError;
use crate::pipeline::FailurePolicy;

const DEFAULT_INPUT_TEXT: &str = "Climate change is accelerating with global temperatures rising \
faster than predicted. Recent studies show the Arctic ice melting at unprecedented rates, \
contributing to sea level rise. Meanwhile, extreme weather events including floods, wildfires, \
and hurricanes have increased in frequency and intensity worldwide.";

/// A service the orchestrator pays for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidService {
    /// Service DID.
    pub did: String,
    /// Amount in wei, kept as given; the gateway validates it at payment time.
    pub amount: String,
}

/// Configuration for the payment crew.
#[derive(Debug, Clone)]
pub struct CrewConfig {
    /// Analyzer service (env: ANALYZER_SERVICE_DID, ANALYZER_PAYMENT_AMOUNT).
    pub analyzer: PaidService,
    /// Summarizer service (env: SUMMARIZER_SERVICE_DID, SUMMARIZER_PAYMENT_AMOUNT).
    pub summarizer: PaidService,
    /// Text handed to the crew as `initial_text` (env: CREW_INPUT_TEXT).
    pub input_text: String,
    /// What to do with tasks whose payment failed (env: CREW_FAILURE_POLICY, default: block).
    pub failure_policy: FailurePolicy,
    /// Payment gateway settings (NEVERMINED_* variables).
    pub gateway: GatewayConfig,
}

impl CrewConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, CrewError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CrewError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let required = |key: &'static str| {
            var(key).ok_or_else(|| CrewError::Config(format!("{key} is required")))
        };

        let analyzer = PaidService {
            did: required("ANALYZER_SERVICE_DID")?,
            amount: required("ANALYZER_PAYMENT_AMOUNT")?,
        };

        let summarizer = PaidService {
            did: required("SUMMARIZER_SERVICE_DID")?,
            amount: required("SUMMARIZER_PAYMENT_AMOUNT")?,
        };

        let input_text = var("CREW_INPUT_TEXT").unwrap_or_else(|| DEFAULT_INPUT_TEXT.to_string());

        let failure_policy = match var("CREW_FAILURE_POLICY") {
            Some(raw) => raw.parse()?,
            None => FailurePolicy::default(),
        };

        let gateway = GatewayConfig::from_lookup(&lookup);

        Ok(Self {
            analyzer,
            summarizer,
            input_text,
            failure_policy,
            gateway,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(extra: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut map: HashMap<String, String> = [
            ("ANALYZER_SERVICE_DID", "did:nv:analyzer"),
            ("ANALYZER_PAYMENT_AMOUNT", "1000"),
            ("SUMMARIZER_SERVICE_DID", "did:nv:summarizer"),
            ("SUMMARIZER_PAYMENT_AMOUNT", "500"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in extra {
            map.insert(k.to_string(), v.to_string());
        }
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_loads_services_and_defaults() {
        let config = CrewConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config.analyzer.did, "did:nv:analyzer");
        assert_eq!(config.summarizer.amount, "500");
        assert!(config.input_text.starts_with("Climate change"));
        assert_eq!(config.failure_policy, FailurePolicy::Block);
        assert_eq!(config.gateway.api_key, None);
        assert_eq!(config.gateway.environment, "testing");
    }

    #[test]
    fn test_passes_gateway_variables_through() {
        let config = CrewConfig::from_lookup(vars(&[
            ("NEVERMINED_API_KEY", "key"),
            ("NEVERMINED_ENVIRONMENT", "staging"),
            ("CREW_FAILURE_POLICY", "continue"),
        ]))
        .unwrap();
        assert_eq!(config.gateway.api_key.as_deref(), Some("key"));
        assert_eq!(config.gateway.environment, "staging");
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_missing_service_is_config_error() {
        let config = CrewConfig::from_lookup(vars(&[("SUMMARIZER_SERVICE_DID", "")]));
        match config {
            Err(CrewError::Config(msg)) => assert!(msg.contains("SUMMARIZER_SERVICE_DID")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_failure_policy_rejected() {
        assert!(CrewConfig::from_lookup(vars(&[("CREW_FAILURE_POLICY", "retry")])).is_err());
    }
}
