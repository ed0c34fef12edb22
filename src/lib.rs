//! # certpolicy
//!
//! Certificate policy translation and validation. A vendor-neutral
//! [`PolicySpecification`] describes what certificate requests must satisfy
//! (the enforced policy) and what they are pre-filled with (the defaults). This
//! crate checks a specification against a backend's rules and translates it into
//! that backend's document.
//!
//! ## Architecture
//!
//! ```text
//! PolicySpecification → validation::{tpp, cloud} → translation::{tpp, cloud}
//!                                                      ↓                ↓
//!                                                  TppPolicy   CloudPolicyRequest
//!                                                      ↓
//!                                            PolicySpecification (reverse)
//! ```
//!
//! ## Core Components
//!
//! - **Domain**: neutral specification, backend documents, constraint tables
//! - **Validation**: per-backend rule sets reporting the first violation
//! - **Translation**: validated specification to backend document, and back for TPP
//! - **Observability**: `tracing` spans and events around every operation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use certpolicy::{PolicyBackend, PolicySpecification, Result, TppBackend};
//!
//! fn zone_policy(spec: &PolicySpecification) -> Result<()> {
//!     let document = TppBackend::validate_and_translate(spec)?;
//!     println!("{}", serde_json::to_string_pretty(&document).unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod translation;
pub mod validation;

// Re-export commonly used types and traits
pub use config::{AppConfig, ObservabilityConfig};
pub use domain::{
    CertificateAuthorityInfo, CloudPolicyRequest, PolicySpecification, TppPolicy, ZonePath,
};
pub use errors::{ErrorKind, PolicyError, Result};
pub use observability::init_logging;
pub use translation::{BackendKind, CloudBackend, PolicyBackend, TppBackend};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
