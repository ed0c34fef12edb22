//! Common test utilities for all integration tests.
//!
//! Provides YAML specification fixtures and small builders.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

use certpolicy::domain::{Policy, PolicySpecification, SubjectAltNames};

/// Zone policy with enforced subject and key values plus a few defaults.
pub const TPP_SPECIFICATION: &str = r#"
users:
  - jdoe
approvers:
  - security-team
policy:
  domains:
    - example.com
    - example.org
  wildcardAllowed: false
  certificateAuthority: '\VED\Policy\Certificate Authorities\Internal CA'
  subject:
    orgs: [Acme]
    orgUnits: [Engineering]
    localities: [Austin]
    states: [Texas]
    countries: [US]
  keyPair:
    keyTypes: [RSA]
    rsaKeySizes: [2048]
    generationType: "0"
    reuseAllowed: false
  subjectAltNames:
    dnsAllowed: true
    ipAllowed: false
    emailAllowed: false
    uriAllowed: true
    upnAllowed: false
"#;

/// Only defaults, nothing enforced.
pub const TPP_DEFAULTS_ONLY: &str = r#"
default:
  subject:
    org: Acme
    orgUnits: [Engineering]
    country: US
  keyPair:
    keyType: ECDSA
    ellipticCurve: P384
    generationType: "1"
"#;

/// Cloud issuing template with defaults inside the enforced values.
pub const CLOUD_SPECIFICATION: &str = r#"
policy:
  domains:
    - venafi.example
  certificateAuthority: 'DIGICERT\digicert-account\ssl_plus'
  maxValidDays: 120
  subject:
    orgs: [Acme]
    orgUnits: [Engineering, Operations]
    localities: ['.*']
    states: [Texas]
    countries: [US]
  keyPair:
    keyTypes: [RSA]
    rsaKeySizes: [2048, 4096]
    reuseAllowed: true
  subjectAltNames:
    ipAllowed: false
default:
  subject:
    org: Acme
    orgUnits: [Operations]
    locality: Austin
    country: US
  keyPair:
    keyType: RSA
    rsaKeySize: 4096
"#;

/// Parse a YAML fixture
pub fn load(yaml: &str) -> PolicySpecification {
    serde_yaml::from_str(yaml).expect("fixture should parse")
}

/// Specification carrying only SAN permissions
pub fn with_subject_alt_names(sans: SubjectAltNames) -> PolicySpecification {
    PolicySpecification {
        policy: Some(Policy {
            subject_alt_names: Some(sans),
            ..Policy::default()
        }),
        ..PolicySpecification::default()
    }
}
