//! Access control configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::Environment;

/// Clearly marked development-only signing secret.
///
/// Validation refuses to start a production deployment with this value.
pub const DEV_TIER_PROOF_SECRET: &str = "dev-only-tier-proof-secret-do-not-deploy";

fn default_secret() -> SecretString {
    SecretString::new(DEV_TIER_PROOF_SECRET.to_string())
}

fn default_attempt_limit() -> u32 {
    30
}

fn default_attempt_window_secs() -> u32 {
    60
}

/// Configuration for tier-proof signing and access attempt limiting.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// HMAC secret for tier-proof tokens. Defaults to a marked dev value
    /// that production validation rejects.
    #[serde(default = "default_secret")]
    pub tier_proof_secret: SecretString,

    /// Access attempts allowed per report per window.
    #[serde(default = "default_attempt_limit")]
    pub attempt_limit: u32,

    /// Attempt window length in seconds.
    #[serde(default = "default_attempt_window_secs")]
    pub attempt_window_secs: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            tier_proof_secret: default_secret(),
            attempt_limit: default_attempt_limit(),
            attempt_window_secs: default_attempt_window_secs(),
        }
    }
}

impl AccessConfig {
    /// Validates the section against the deployment environment.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.tier_proof_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ValidationError::invalid(
                "access.tier_proof_secret",
                "must not be blank",
            ));
        }
        if *environment == Environment::Production {
            if secret == DEV_TIER_PROOF_SECRET {
                return Err(ValidationError::invalid(
                    "access.tier_proof_secret",
                    "development default must not be used in production",
                ));
            }
            if secret.len() < 32 {
                return Err(ValidationError::invalid(
                    "access.tier_proof_secret",
                    "must be at least 32 characters in production",
                ));
            }
        }
        if self.attempt_limit == 0 || self.attempt_window_secs == 0 {
            return Err(ValidationError::invalid(
                "access.attempt_limit",
                "limit and window must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_default_is_valid_in_development() {
        let config = AccessConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn dev_default_is_rejected_in_production() {
        let config = AccessConfig::default();
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn short_secret_is_rejected_in_production() {
        let config = AccessConfig {
            tier_proof_secret: SecretString::new("short".to_string()),
            ..AccessConfig::default()
        };
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn long_secret_passes_production_validation() {
        let config = AccessConfig {
            tier_proof_secret: SecretString::new(
                "a-real-secret-that-is-long-enough-for-prod".to_string(),
            ),
            ..AccessConfig::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
