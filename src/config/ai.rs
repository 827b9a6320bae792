//! Generative text provider configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u32 {
    18
}

fn default_max_tokens() -> u32 {
    900
}

/// Configuration for the AI insight augmenter's text provider.
///
/// The augmenter is optional by design: with no API key configured, report
/// generation runs entirely on deterministic templates.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Provider API key. Absent means augmentation is disabled.
    pub api_key: Option<SecretString>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard deadline for one augmentation call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,

    /// Completion token budget.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AiConfig {
    /// True when augmentation can be attempted at all.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.api_key {
            if key.expose_secret().trim().is_empty() {
                return Err(ValidationError::invalid("ai.api_key", "must not be blank"));
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::invalid(
                "ai.timeout_secs",
                "must be between 1 and 60",
            ));
        }
        Ok(())
    }
}
