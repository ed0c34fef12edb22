//! Constraint tables
//!
//! Supported algorithm, key size and curve values per backend. Built once on
//! first access and never mutated, so concurrent readers need no locking.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Single-pattern marker meaning "any value is allowed"
pub const ALLOW_ALL: &str = ".*";

/// Key type accepted by the cloud backend
pub const CLOUD_KEY_TYPE: &str = "RSA";

/// Key length used when neither policy nor default names one
pub const DEFAULT_RSA_KEY_SIZE: u32 = 2048;

/// Generation type values: `"0"` service generated, `"1"` manual CSR
pub const GENERATION_TYPES: [&str; 2] = ["0", "1"];

lazy_static! {
    /// Key algorithms supported by the managed-PKI backend
    pub static ref TPP_KEY_TYPES: HashSet<&'static str> = ["RSA", "ECDSA"].into_iter().collect();

    /// RSA key sizes supported by the managed-PKI backend
    pub static ref TPP_RSA_KEY_SIZES: HashSet<u32> =
        [512, 1024, 2048, 3072, 4096].into_iter().collect();

    /// Elliptic curves supported by the managed-PKI backend
    pub static ref TPP_ELLIPTIC_CURVES: HashSet<&'static str> =
        ["P256", "P384", "P521"].into_iter().collect();

    /// RSA key sizes supported by the cloud backend
    pub static ref CLOUD_RSA_KEY_SIZES: HashSet<u32> = [1024, 2048, 4096].into_iter().collect();
}
