//! Gateway configuration from environment variables.

use std::time::Duration;

use crate::constants::{
    DEFAULT_ENVIRONMENT, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_BACKEND_URL, ENV_ENVIRONMENT,
    ENV_TIMEOUT_SECS,
};
use crate::environment::Environment;
use crate::error::ConfigError;

/// Configuration read once when a [`PaymentGateway`](crate::PaymentGateway) is built.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Nevermined API key (env: NEVERMINED_API_KEY). If absent, the gateway runs in mock mode.
    pub api_key: Option<String>,
    /// Environment name (env: NEVERMINED_ENVIRONMENT, default: testing).
    pub environment: String,
    /// Override for the environment's backend URL (env: NEVERMINED_BACKEND_URL).
    pub backend_url: Option<String>,
    /// Per-payment timeout in seconds (env: NEVERMINED_TIMEOUT_SECS, default: 30).
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("backend_url", &self.backend_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            backend_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let api_key = var(ENV_API_KEY);

        let environment = var(ENV_ENVIRONMENT).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let backend_url = var(ENV_BACKEND_URL).map(|u| u.trim_end_matches('/').to_string());

        let timeout_secs = var(ENV_TIMEOUT_SECS)
            .and_then(|s| s.trim().parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            environment,
            backend_url,
            timeout_secs,
        }
    }

    /// Set the API key, switching the resulting gateway to live mode.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Resolve the configured environment name.
    pub fn resolve_environment(&self) -> Result<Environment, ConfigError> {
        Environment::from_name(&self.environment)
    }

    /// Backend base URL: the override if set, otherwise the environment's own.
    pub fn resolve_backend_url(&self) -> Result<String, ConfigError> {
        match &self.backend_url {
            Some(url) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Invalid {
                        key: ENV_BACKEND_URL,
                        reason: format!("expected an http(s) URL, got {url:?}"),
                    });
                }
                Ok(url.clone())
            }
            None => Ok(self.resolve_environment()?.backend_url().to_string()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GatewayConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.environment, "testing");
        assert_eq!(config.backend_url, None);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("NEVERMINED_API_KEY", "test_api_key"),
            ("NEVERMINED_ENVIRONMENT", "sandbox"),
            ("NEVERMINED_BACKEND_URL", "http://127.0.0.1:9000/"),
            ("NEVERMINED_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("test_api_key"));
        assert_eq!(config.resolve_environment().unwrap(), Environment::Sandbox);
        assert_eq!(config.resolve_backend_url().unwrap(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_api_key_means_mock() {
        let config = GatewayConfig::from_lookup(lookup(&[("NEVERMINED_API_KEY", "")]));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_bad_timeout_falls_back_to_default() {
        for raw in ["zero", "0", "-1"] {
            let config = GatewayConfig::from_lookup(lookup(&[("NEVERMINED_TIMEOUT_SECS", raw)]));
            assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS, "{raw}");
        }
    }

    #[test]
    fn test_backend_url_defaults_to_environment() {
        let config = GatewayConfig::default().with_environment("live");
        assert_eq!(
            config.resolve_backend_url().unwrap(),
            Environment::Live.backend_url()
        );
    }

    #[test]
    fn test_backend_url_override_must_be_http() {
        let config = GatewayConfig::default().with_backend_url("ftp://example.com");
        assert!(matches!(
            config.resolve_backend_url(),
            Err(ConfigError::Invalid { key: "NEVERMINED_BACKEND_URL", .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GatewayConfig::default().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
