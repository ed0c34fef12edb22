//! # Translation Module
//!
//! Mapping between the neutral [`PolicySpecification`] and backend documents.
//!
//! - [`tpp`]: bidirectional, zone policy with locked attributes
//! - [`cloud`]: one-directional, regex based issuing-template request
//!
//! [`PolicyBackend`] ties each translator to its validator so callers can run
//! the usual "validate, then translate" flow in one call.

pub mod cloud;
pub mod tpp;

pub use cloud::{build_cloud_cit_request, convert_to_regex};
pub use tpp::{build_policy_specification_for_tpp, build_tpp_policy};

use crate::domain::{CloudPolicyRequest, PolicySpecification, TppPolicy};
use crate::errors::{PolicyError, Result};
use crate::validation::{validate_cloud_policy_specification, validate_tpp_policy_specification};
use std::fmt;
use std::str::FromStr;

/// A certificate issuing backend with its own rule set and document format
pub trait PolicyBackend {
    /// Document sent to the backend
    type Document;

    /// Human readable backend name
    const NAME: &'static str;

    /// Check the specification against this backend's rules
    fn validate(spec: &PolicySpecification) -> Result<()>;

    /// Translate an already validated specification
    fn translate(spec: &PolicySpecification) -> Result<Self::Document>;

    /// Validate, then translate
    fn validate_and_translate(spec: &PolicySpecification) -> Result<Self::Document> {
        Self::validate(spec)?;
        Self::translate(spec)
    }
}

/// Managed-PKI zone policy backend
#[derive(Debug, Clone, Copy, Default)]
pub struct TppBackend;

impl PolicyBackend for TppBackend {
    type Document = TppPolicy;

    const NAME: &'static str = "TPP";

    fn validate(spec: &PolicySpecification) -> Result<()> {
        validate_tpp_policy_specification(spec)
    }

    fn translate(spec: &PolicySpecification) -> Result<TppPolicy> {
        Ok(build_tpp_policy(spec))
    }
}

impl TppBackend {
    /// Rebuild the neutral specification from a zone policy
    pub fn reverse(document: &TppPolicy) -> Result<PolicySpecification> {
        build_policy_specification_for_tpp(document)
    }
}

/// Cloud issuing-template backend
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudBackend;

impl PolicyBackend for CloudBackend {
    type Document = CloudPolicyRequest;

    const NAME: &'static str = "cloud";

    fn validate(spec: &PolicySpecification) -> Result<()> {
        validate_cloud_policy_specification(spec)
    }

    fn translate(spec: &PolicySpecification) -> Result<CloudPolicyRequest> {
        build_cloud_cit_request(spec)
    }
}

/// Backend selector, e.g. from a command line flag or a config value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Tpp,
    Cloud,
}

impl BackendKind {
    /// Run the validator that matches this backend
    pub fn validate(&self, spec: &PolicySpecification) -> Result<()> {
        match self {
            BackendKind::Tpp => TppBackend::validate(spec),
            BackendKind::Cloud => CloudBackend::validate(spec),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Tpp => write!(f, "tpp"),
            BackendKind::Cloud => write!(f, "cloud"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tpp" => Ok(BackendKind::Tpp),
            "cloud" => Ok(BackendKind::Cloud),
            _ => Err(PolicyError::unsupported("backend", s, "this engine")),
        }
    }
}
