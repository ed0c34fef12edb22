//! Neutral certificate policy specification
//!
//! The vendor-neutral document that both backends are translated from. A
//! [`Policy`] holds the constraints a certificate request MUST satisfy, while
//! [`PolicyDefaults`] holds the values used to pre-fill a request when the requester
//! supplies nothing.
//!
//! Scalar fields are `Option` so that "unset" stays distinguishable from a
//! zero-equivalent value (e.g. an RSA size of `0`).

use serde::{Deserialize, Serialize};

/// Root of the neutral specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySpecification {
    /// Owners of the policy (opaque identities)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    /// Approvers of the policy (opaque identities)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approvers: Vec<String>,

    /// Enforced constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,

    /// Recommended values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PolicyDefaults>,
}

impl PolicySpecification {
    /// Enforced subject, if any
    pub fn policy_subject(&self) -> Option<&Subject> {
        self.policy.as_ref().and_then(|p| p.subject.as_ref())
    }

    /// Enforced key pair, if any
    pub fn policy_key_pair(&self) -> Option<&KeyPair> {
        self.policy.as_ref().and_then(|p| p.key_pair.as_ref())
    }

    /// Default subject, if any
    pub fn default_subject(&self) -> Option<&DefaultSubject> {
        self.default.as_ref().and_then(|d| d.subject.as_ref())
    }

    /// Default key pair, if any
    pub fn default_key_pair(&self) -> Option<&DefaultKeyPair> {
        self.default.as_ref().and_then(|d| d.key_pair.as_ref())
    }
}

/// Enforced policy constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Whitelist of domain suffixes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_allowed: Option<bool>,

    /// Composite `ca_type\ca_account_key\vendor_product_name` identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_valid_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<KeyPair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_alt_names: Option<SubjectAltNames>,
}

/// Enforced subject values.
///
/// Every list holds at most one value; the lists exist for wire compatibility
/// with the backends, not for multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orgs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub org_units: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub localities: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

/// Enforced key pair values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rsa_key_sizes: Vec<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elliptic_curves: Vec<String>,

    /// `"0"` automatic (service generated) or `"1"` manual CSR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_allowed: Option<bool>,
}

/// Subject alternative name permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAltNames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_allowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_allowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_allowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_allowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upn_allowed: Option<bool>,
}

impl SubjectAltNames {
    /// Every SAN type with its wire name, in a fixed order
    pub fn entries(&self) -> [(&'static str, Option<bool>); 5] {
        [
            ("dnsAllowed", self.dns_allowed),
            ("ipAllowed", self.ip_allowed),
            ("emailAllowed", self.email_allowed),
            ("uriAllowed", self.uri_allowed),
            ("upnAllowed", self.upn_allowed),
        ]
    }

    /// Set every SAN type to the same explicit value
    pub fn all(allowed: bool) -> Self {
        Self {
            dns_allowed: Some(allowed),
            ip_allowed: Some(allowed),
            email_allowed: Some(allowed),
            uri_allowed: Some(allowed),
            upn_allowed: Some(allowed),
        }
    }
}

/// Recommended values used when a request leaves a field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<DefaultSubject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<DefaultKeyPair>,
}

/// Recommended subject values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSubject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub org_units: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl DefaultSubject {
    /// True when no recommended subject value is set
    pub fn is_empty(&self) -> bool {
        self.org.is_none()
            && self.org_units.is_empty()
            && self.locality.is_none()
            && self.state.is_none()
            && self.country.is_none()
    }
}

/// Recommended key pair values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultKeyPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsa_key_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elliptic_curve: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_allowed: Option<bool>,
}

/// A string that is set and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The single value of a policy list, if it is set and non-empty.
pub(crate) fn first_non_empty(values: &[String]) -> Option<&str> {
    values.first().map(String::as_str).filter(|v| !v.is_empty())
}

/// The single value of a size list, if it is set and non-zero.
pub(crate) fn first_non_zero(values: &[u32]) -> Option<u32> {
    values.first().copied().filter(|v| *v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_walk_optional_containers() {
        let spec = PolicySpecification {
            policy: Some(Policy {
                subject: Some(Subject {
                    orgs: vec!["Acme".to_string()],
                    ..Subject::default()
                }),
                ..Policy::default()
            }),
            ..PolicySpecification::default()
        };

        assert_eq!(spec.policy_subject().map(|s| s.orgs.len()), Some(1));
        assert!(spec.policy_key_pair().is_none());
        assert!(spec.default_subject().is_none());
        assert!(spec.default_key_pair().is_none());
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "users": ["jdoe"],
            "policy": {
                "domains": ["example.com"],
                "wildcardAllowed": true,
                "maxValidDays": 90,
                "keyPair": { "keyTypes": ["RSA"], "rsaKeySizes": [2048], "reuseAllowed": false },
                "subjectAltNames": { "dnsAllowed": false }
            },
            "default": { "subject": { "org": "Acme", "orgUnits": ["Eng"] } }
        }"#;

        let spec: PolicySpecification = serde_json::from_str(json).unwrap();
        let policy = spec.policy.as_ref().unwrap();
        assert_eq!(policy.wildcard_allowed, Some(true));
        assert_eq!(policy.max_valid_days, Some(90));
        assert_eq!(policy.key_pair.as_ref().unwrap().rsa_key_sizes, vec![2048]);
        assert_eq!(policy.subject_alt_names.unwrap().dns_allowed, Some(false));
        assert_eq!(policy.subject_alt_names.unwrap().ip_allowed, None);
        assert_eq!(spec.default_subject().unwrap().org.as_deref(), Some("Acme"));
    }

    #[test]
    fn unset_size_differs_from_zero() {
        let unset = DefaultKeyPair::default();
        let zero = DefaultKeyPair {
            rsa_key_size: Some(0),
            ..DefaultKeyPair::default()
        };
        assert_ne!(unset, zero);
    }

    #[test]
    fn presence_helpers_ignore_empty_values() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(first_non_empty(&[String::new()]), None);
        assert_eq!(first_non_empty(&[]), None);
        assert_eq!(first_non_zero(&[0]), None);
        assert_eq!(first_non_zero(&[4096]), Some(4096));
    }

    #[test]
    fn default_subject_emptiness() {
        assert!(DefaultSubject::default().is_empty());
        let subject = DefaultSubject {
            org_units: vec!["Eng".to_string()],
            ..DefaultSubject::default()
        };
        assert!(!subject.is_empty());
    }

    #[test]
    fn san_entries_keep_wire_names() {
        let sans = SubjectAltNames {
            ip_allowed: Some(true),
            ..SubjectAltNames::default()
        };
        let entries = sans.entries();
        assert_eq!(entries[0], ("dnsAllowed", None));
        assert_eq!(entries[1], ("ipAllowed", Some(true)));
        assert_eq!(SubjectAltNames::all(false).upn_allowed, Some(false));
    }
}
