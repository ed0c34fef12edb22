//! # Structured Logging
//!
//! Span macros and startup logging helpers built on the tracing ecosystem.
//!
//! Validation and translation calls run inside a [`policy_span!`](crate::policy_span)
//! so that every event they emit carries the operation and backend as fields.

/// Create a tracing span for a policy operation.
///
/// ```rust,ignore
/// let span = policy_span!("translate", "TPP");
/// let span = policy_span!("translate", "cloud", zone = "App\\Cit");
/// ```
#[macro_export]
macro_rules! policy_span {
    ($operation:expr, $backend:expr) => {
        tracing::debug_span!(
            "policy_operation",
            operation = %$operation,
            backend = %$backend
        )
    };
    ($operation:expr, $backend:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "policy_operation",
            operation = %$operation,
            backend = %$backend,
            $($field)*
        )
    };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        service_name = %config.observability.service_name,
        log_level = %config.observability.log_level,
        json_logging = %config.observability.json_logging,
        version = crate::VERSION,
        "Certificate policy engine configuration"
    );
}
