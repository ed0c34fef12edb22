//! Integration tests for configuration management
//!
//! These tests validate that the configuration system properly reads
//! `CERTPOLICY__*` environment variables and that logging can be installed
//! from the loaded settings.

use certpolicy::observability::log_config_info;
use certpolicy::{init_logging, AppConfig, ErrorKind, Result};
use std::env;
use std::sync::Mutex;

// Use a mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const LOG_LEVEL_VAR: &str = "CERTPOLICY__OBSERVABILITY__LOG_LEVEL";
const SERVICE_NAME_VAR: &str = "CERTPOLICY__OBSERVABILITY__SERVICE_NAME";

/// Test that configuration properly reads environment variables
#[test]
fn test_config_environment_integration() -> Result<()> {
    let _guard = ENV_MUTEX.lock().unwrap();

    // Save original values to restore later
    let original_level = env::var(LOG_LEVEL_VAR).ok();
    let original_name = env::var(SERVICE_NAME_VAR).ok();

    env::set_var(LOG_LEVEL_VAR, "warn");
    env::set_var(SERVICE_NAME_VAR, "zone-sync");

    let config = AppConfig::load()?;
    assert_eq!(config.observability.log_level, "warn");
    assert_eq!(config.observability.service_name, "zone-sync");

    // Test with invalid level
    env::set_var(LOG_LEVEL_VAR, "chatty");
    let err = AppConfig::load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    // Restore original environment
    match original_level {
        Some(level) => env::set_var(LOG_LEVEL_VAR, level),
        None => env::remove_var(LOG_LEVEL_VAR),
    }
    match original_name {
        Some(name) => env::set_var(SERVICE_NAME_VAR, name),
        None => env::remove_var(SERVICE_NAME_VAR),
    }

    Ok(())
}

/// Test that configuration defaults work when no environment variables are set
#[test]
fn test_config_defaults_integration() -> Result<()> {
    let _guard = ENV_MUTEX.lock().unwrap();

    let original_level = env::var(LOG_LEVEL_VAR).ok();
    let original_name = env::var(SERVICE_NAME_VAR).ok();
    env::remove_var(LOG_LEVEL_VAR);
    env::remove_var(SERVICE_NAME_VAR);

    let config = AppConfig::load()?;
    assert_eq!(config.observability.service_name, "certpolicy");
    assert_eq!(config.observability.log_level, "info");

    if let Some(level) = original_level {
        env::set_var(LOG_LEVEL_VAR, level);
    }
    if let Some(name) = original_name {
        env::set_var(SERVICE_NAME_VAR, name);
    }

    Ok(())
}

/// Logging can be installed from loaded settings, more than once
#[test]
fn test_logging_from_loaded_config() -> Result<()> {
    let config = AppConfig::default();

    init_logging(&config.observability)?;
    init_logging(&config.observability)?;
    log_config_info(&config);

    Ok(())
}
