//! Redis configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Redis connection configuration for TTL-backed attempt counters.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://localhost:6379`.
    pub url: String,
}

impl RedisConfig {
    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::invalid(
                "redis.url",
                "must be a redis:// or rediss:// URL",
            ));
        }
        Ok(())
    }
}
