//! Known Nevermined environments and their backend endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A Nevermined deployment the gateway can pay through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Backend running on the developer's machine.
    Local,
    /// Shared testing deployment (the default).
    #[default]
    Testing,
    /// Pre-release staging deployment.
    Staging,
    /// Public sandbox with test funds.
    Sandbox,
    /// Production.
    Live,
}

impl Environment {
    /// Every environment, in resolution order.
    pub const ALL: [Environment; 5] = [
        Environment::Local,
        Environment::Testing,
        Environment::Staging,
        Environment::Sandbox,
        Environment::Live,
    ];

    /// Resolve an environment by name. Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|env| env.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownEnvironment(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Testing => "testing",
            Self::Staging => "staging",
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }

    /// Base URL of the environment's payments backend.
    pub fn backend_url(&self) -> &'static str {
        match self {
            Self::Local => "http://localhost:3001",
            Self::Testing => "https://one-backend.testing.nevermined.app",
            Self::Staging => "https://one-backend.staging.nevermined.app",
            Self::Sandbox => "https://api.sandbox.nevermined.app",
            Self::Live => "https://api.live.nevermined.app",
        }
    }

    /// Whether payments in this environment move real funds.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_every_known_name() {
        for env in Environment::ALL {
            assert_eq!(Environment::from_name(env.name()).unwrap(), env);
        }
    }

    #[test]
    fn test_resolution_ignores_case_and_whitespace() {
        assert_eq!(
            Environment::from_name("  Testing ").unwrap(),
            Environment::Testing
        );
        assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Live);
    }

    #[test]
    fn test_unknown_environment_rejected() {
        assert_eq!(
            Environment::from_name("atlantis"),
            Err(ConfigError::UnknownEnvironment("atlantis".to_string()))
        );
        assert!(Environment::from_name("").is_err());
    }

    #[test]
    fn test_default_is_testing() {
        assert_eq!(Environment::default().name(), crate::DEFAULT_ENVIRONMENT);
        assert!(!Environment::default().is_production());
        assert!(Environment::Live.is_production());
    }

    #[test]
    fn test_backend_urls_have_no_trailing_slash() {
        for env in Environment::ALL {
            assert!(!env.backend_url().ends_with('/'), "{env}");
        }
    }
}
