//! Domain layer
//!
//! Pure value types for the neutral policy specification and the two backend
//! documents it is translated into, plus the fixed constraint tables and the
//! composite identifier formats. Nothing here performs validation or
//! translation; see [`crate::validation`] and [`crate::translation`].
//!
//! ## Module Organization
//!
//! - `specification`: the vendor-neutral policy document
//! - `tpp`: managed-PKI zone policy (locked attributes)
//! - `cloud`: cloud issuing-template request (regex based)
//! - `constraints`: supported values per backend
//! - `identifiers`: CA and zone identifier parsing

pub mod cloud;
pub mod constraints;
pub mod identifiers;
pub mod specification;
pub mod tpp;

pub use cloud::{CloudPolicyRequest, KeyTypes, Product, RecommendedKey, RecommendedSettings};
pub use identifiers::{
    get_application_name, get_cert_authority_info, get_cit_name, CertificateAuthorityInfo,
    ZonePath, PATH_DELIMITER,
};
pub use specification::{
    DefaultKeyPair, DefaultSubject, KeyPair, Policy, PolicyDefaults, PolicySpecification, Subject,
    SubjectAltNames,
};
pub use tpp::{LockedAttribute, SanType, TppPolicy};
