//! # Observability Infrastructure
//!
//! Structured logging for the policy engine. The library never installs a
//! subscriber on its own; embedding applications call [`init_logging`] once at
//! startup (or install their own subscriber).

pub mod logging;

pub use logging::log_config_info;

use crate::config::ObservabilityConfig;
use crate::errors::{PolicyError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// An explicit `RUST_LOG` wins over the configured level. Installing a second
/// time is not an error: the first subscriber stays in place.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            PolicyError::config_with_source(
                format!("Invalid log level '{}'", config.log_level),
                Box::new(e),
            )
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_logging {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::info!(
            service_name = %config.service_name,
            json_logging = config.json_logging,
            "Logging initialized"
        );
    } else {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
        tracing::debug!("Global subscriber already installed");
    }

    Ok(())
}
