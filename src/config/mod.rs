//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `BRAND_COMPASS`
//! prefix and `__` (double underscore) as the nesting separator, then
//! injected into the engine as an explicit object; no component reads the
//! process environment directly.
//!
//! # Example
//!
//! ```no_run
//! use brand_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod access;
mod ai;
mod billing;
mod database;
mod error;
mod redis;

pub use access::{AccessConfig, DEV_TIER_PROOF_SECRET};
pub use ai::AiConfig;
pub use billing::BillingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;

use serde::Deserialize;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment; drives production-only validation.
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// Redis configuration (TTL-backed attempt counters).
    pub redis: RedisConfig,

    /// Generative text provider configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Upgrade-credit coupon references.
    #[serde(default)]
    pub billing: BillingConfig,

    /// Tier-proof signing and attempt limiting.
    #[serde(default)]
    pub access: AccessConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development), then reads variables
    /// with the `BRAND_COMPASS` prefix:
    ///
    /// - `BRAND_COMPASS__DATABASE__URL=...` -> `database.url`
    /// - `BRAND_COMPASS__ACCESS__TIER_PROOF_SECRET=...` -> `access.tier_proof_secret`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BRAND_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including the development signing secret appearing in production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.redis.validate()?;
        self.ai.validate()?;
        self.billing.validate()?;
        self.access.validate(&self.environment)?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
