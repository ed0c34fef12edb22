//! # Configuration Management
//!
//! Ambient settings for embedding the policy engine: only logging is
//! configurable. The constraint tables are fixed and never read from here.
//!
//! Values are layered: serde defaults first, then `CERTPOLICY__*` environment
//! variables (`__` separates nesting levels), then validation.
//!
//! ```text
//! CERTPOLICY__OBSERVABILITY__LOG_LEVEL=debug
//! CERTPOLICY__OBSERVABILITY__JSON_LOGGING=true
//! ```

pub mod settings;

pub use settings::{AppConfig, ObservabilityConfig};

use crate::errors::Result;
use config::{Config, Environment};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CERTPOLICY";

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    /// Load configuration from an explicit environment source
    pub fn load_from(environment: Environment) -> Result<Self> {
        let config: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        tracing::debug!(
            service_name = %config.observability.service_name,
            log_level = %config.observability.log_level,
            "Configuration loaded"
        );

        Ok(config)
    }
}
