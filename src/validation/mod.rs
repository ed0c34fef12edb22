//! # Validation Module
//!
//! Consistency checks for a [`PolicySpecification`](crate::domain::PolicySpecification)
//! before it is translated for a backend. Each backend has its own rule set:
//!
//! 1. [`tpp`]: cardinality, constraint tables and strict policy/default equality
//! 2. [`cloud`]: RSA-only keys, no explicit SAN permissions, defaults must fall
//!    inside the enforced allowed values
//!
//! Validators stop at the first violated rule; errors are never accumulated.
//!
//! Enumerable constraints are checked only through [`all_strings_allowed`] and
//! [`all_ints_allowed`]: exact, case-sensitive membership with an empty input
//! being vacuously allowed.

use std::collections::HashSet;

pub mod cloud;
pub mod tpp;

pub use cloud::validate_cloud_policy_specification;
pub use tpp::validate_tpp_policy_specification;

/// A set of permitted string values
pub trait AllowedStrings {
    fn allows(&self, value: &str) -> bool;
}

impl AllowedStrings for HashSet<&str> {
    fn allows(&self, value: &str) -> bool {
        self.contains(value)
    }
}

impl<S: AsRef<str>> AllowedStrings for [S] {
    fn allows(&self, value: &str) -> bool {
        self.iter().any(|allowed| allowed.as_ref() == value)
    }
}

/// A set of permitted integer values
pub trait AllowedInts {
    fn allows(&self, value: u32) -> bool;
}

impl AllowedInts for HashSet<u32> {
    fn allows(&self, value: u32) -> bool {
        self.contains(&value)
    }
}

impl AllowedInts for [u32] {
    fn allows(&self, value: u32) -> bool {
        self.contains(&value)
    }
}

/// True iff every element of `values` is in `allowed`
pub fn all_strings_allowed<S, A>(values: &[S], allowed: &A) -> bool
where
    S: AsRef<str>,
    A: AllowedStrings + ?Sized,
{
    values.iter().all(|value| allowed.allows(value.as_ref()))
}

/// True iff every element of `values` is in `allowed`
pub fn all_ints_allowed<A>(values: &[u32], allowed: &A) -> bool
where
    A: AllowedInts + ?Sized,
{
    values.iter().all(|value| allowed.allows(*value))
}
