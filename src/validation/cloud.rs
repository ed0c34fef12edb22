//! Cloud issuing-template specification rules.
//!
//! The cloud backend only issues RSA keys, never accepts SAN permissions as
//! enforced values and treats a single [`ALLOW_ALL`] pattern as "anything goes".
//! Defaults must fall inside the enforced values rather than equal them.

use crate::domain::constraints::{ALLOW_ALL, CLOUD_KEY_TYPE, CLOUD_RSA_KEY_SIZES};
use crate::domain::specification::non_empty;
use crate::domain::{DefaultKeyPair, KeyPair, PolicySpecification, SubjectAltNames};
use crate::errors::{PolicyError, Result};
use crate::validation::{all_ints_allowed, all_strings_allowed};

const BACKEND: &str = "cloud";

/// Validate a specification destined for the cloud backend
pub fn validate_cloud_policy_specification(spec: &PolicySpecification) -> Result<()> {
    let _span = crate::policy_span!("validate", BACKEND).entered();

    let result = run_rules(spec);
    match &result {
        Ok(()) => tracing::debug!("specification is valid"),
        Err(error) => tracing::debug!(%error, kind = %error.kind(), "specification rejected"),
    }
    result
}

fn run_rules(spec: &PolicySpecification) -> Result<()> {
    if spec.policy.is_some() {
        if let Some(key_pair) = spec.policy_key_pair() {
            validate_policy_key_pair(key_pair)?;
        }

        if let Some(sans) = spec.policy.as_ref().and_then(|p| p.subject_alt_names) {
            validate_subject_alt_names(&sans)?;
        }

        validate_default_subject(spec)?;
        validate_default_key_pair_with_policy(spec)?;
    }

    if let Some(key_pair) = spec.default_key_pair() {
        validate_default_key_pair(key_pair)?;
    }

    Ok(())
}

fn validate_policy_key_pair(key_pair: &KeyPair) -> Result<()> {
    if key_pair.key_types.len() > 1 {
        return Err(PolicyError::cardinality("keyTypes"));
    }
    if let Some(key_type) = key_pair.key_types.first() {
        if key_type != CLOUD_KEY_TYPE {
            return Err(PolicyError::unsupported("keyTypes", key_type, BACKEND));
        }
    }

    if let Some(size) = key_pair
        .rsa_key_sizes
        .iter()
        .find(|size| !CLOUD_RSA_KEY_SIZES.contains(*size))
    {
        return Err(PolicyError::unsupported("rsaKeySizes", size, BACKEND));
    }

    Ok(())
}

fn validate_subject_alt_names(sans: &SubjectAltNames) -> Result<()> {
    for (name, allowed) in sans.entries() {
        if allowed == Some(true) {
            return Err(PolicyError::unsupported(
                format!("subjectAltNames.{}", name),
                true,
                BACKEND,
            ));
        }
    }
    Ok(())
}

/// A default is acceptable when the policy allows everything or lists it
fn default_within(policy_values: &[String], default_value: &str) -> bool {
    matches!(policy_values, [only] if only == ALLOW_ALL)
        || all_strings_allowed(&[default_value], policy_values)
}

fn outside_policy(attribute: &str, default_value: &str) -> PolicyError {
    PolicyError::inconsistent(
        attribute,
        format!("default value '{}' is not among the policy's allowed values", default_value),
    )
}

fn validate_default_subject(spec: &PolicySpecification) -> Result<()> {
    let (Some(subject), Some(default_subject)) = (spec.policy_subject(), spec.default_subject())
    else {
        return Ok(());
    };

    check_single_value("org", &subject.orgs, &default_subject.org)?;

    if !default_subject.org_units.is_empty() && !subject.org_units.is_empty() {
        let allow_all = matches!(subject.org_units.as_slice(), [only] if only == ALLOW_ALL);
        if !allow_all && !all_strings_allowed(&default_subject.org_units, subject.org_units.as_slice()) {
            return Err(outside_policy("orgUnits", &default_subject.org_units.join(",")));
        }
    }

    check_single_value("locality", &subject.localities, &default_subject.locality)?;
    check_single_value("state", &subject.states, &default_subject.state)?;
    check_single_value("country", &subject.countries, &default_subject.country)
}

fn check_single_value(
    attribute: &str,
    policy_values: &[String],
    default_value: &Option<String>,
) -> Result<()> {
    let Some(default_value) = non_empty(default_value) else {
        return Ok(());
    };
    if !policy_values.is_empty() && !default_within(policy_values, default_value) {
        return Err(outside_policy(attribute, default_value));
    }
    Ok(())
}

fn validate_default_key_pair_with_policy(spec: &PolicySpecification) -> Result<()> {
    let (Some(key_pair), Some(default_key_pair)) = (spec.policy_key_pair(), spec.default_key_pair())
    else {
        return Ok(());
    };

    if let Some(key_type) = non_empty(&default_key_pair.key_type) {
        if !key_pair.key_types.is_empty()
            && !all_strings_allowed(&[key_type], key_pair.key_types.as_slice())
        {
            return Err(outside_policy("keyType", key_type));
        }
    }

    if let Some(size) = default_key_pair.rsa_key_size.filter(|s| *s != 0) {
        if !key_pair.rsa_key_sizes.is_empty()
            && !all_ints_allowed(&[size], key_pair.rsa_key_sizes.as_slice())
        {
            return Err(outside_policy("rsaKeySize", &size.to_string()));
        }
    }

    Ok(())
}

fn validate_default_key_pair(key_pair: &DefaultKeyPair) -> Result<()> {
    if let Some(key_type) = non_empty(&key_pair.key_type) {
        if key_type != CLOUD_KEY_TYPE {
            return Err(PolicyError::unsupported("default keyType", key_type, BACKEND));
        }
    }

    if let Some(size) = key_pair.rsa_key_size.filter(|s| *s != 0) {
        if !CLOUD_RSA_KEY_SIZES.contains(&size) {
            return Err(PolicyError::unsupported("default rsaKeySize", size, BACKEND));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DefaultSubject, Policy, PolicyDefaults, Subject};
    use crate::errors::ErrorKind;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn with_key_pair(key_pair: KeyPair) -> PolicySpecification {
        PolicySpecification {
            policy: Some(Policy {
                key_pair: Some(key_pair),
                ..Policy::default()
            }),
            ..PolicySpecification::default()
        }
    }

    fn with_subjects(subject: Subject, default_subject: DefaultSubject) -> PolicySpecification {
        PolicySpecification {
            policy: Some(Policy {
                subject: Some(subject),
                ..Policy::default()
            }),
            default: Some(PolicyDefaults {
                subject: Some(default_subject),
                key_pair: None,
            }),
            ..PolicySpecification::default()
        }
    }

    #[test]
    fn rejects_ecdsa() {
        let spec = with_key_pair(KeyPair {
            key_types: strings(&["ECDSA"]),
            ..KeyPair::default()
        });
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
        assert!(err.to_string().contains("ECDSA"));
    }

    #[test]
    fn rejects_multiple_key_types() {
        let spec = with_key_pair(KeyPair {
            key_types: strings(&["RSA", "RSA"]),
            ..KeyPair::default()
        });
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cardinality);
    }

    #[test]
    fn rsa_sizes_follow_cloud_table() {
        let rejected = with_key_pair(KeyPair {
            rsa_key_sizes: vec![3072],
            ..KeyPair::default()
        });
        let err = validate_cloud_policy_specification(&rejected).unwrap_err();
        assert!(err.to_string().contains("3072"));

        let accepted = with_key_pair(KeyPair {
            key_types: strings(&["RSA"]),
            rsa_key_sizes: vec![2048],
            ..KeyPair::default()
        });
        assert!(validate_cloud_policy_specification(&accepted).is_ok());
    }

    #[test]
    fn explicit_san_permission_is_rejected() {
        let spec = PolicySpecification {
            policy: Some(Policy {
                subject_alt_names: Some(SubjectAltNames {
                    dns_allowed: Some(false),
                    email_allowed: Some(true),
                    ..SubjectAltNames::default()
                }),
                ..Policy::default()
            }),
            ..PolicySpecification::default()
        };
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
        assert!(err.to_string().contains("subjectAltNames.emailAllowed"));
    }

    #[test]
    fn false_or_unset_sans_are_accepted() {
        let spec = PolicySpecification {
            policy: Some(Policy {
                subject_alt_names: Some(SubjectAltNames::all(false)),
                ..Policy::default()
            }),
            ..PolicySpecification::default()
        };
        assert!(validate_cloud_policy_specification(&spec).is_ok());
    }

    #[test]
    fn default_subject_must_fall_inside_policy() {
        let spec = with_subjects(
            Subject {
                orgs: strings(&["Acme", "Acme Labs"]),
                ..Subject::default()
            },
            DefaultSubject {
                org: Some("Acme Labs".to_string()),
                ..DefaultSubject::default()
            },
        );
        assert!(validate_cloud_policy_specification(&spec).is_ok());

        let spec = with_subjects(
            Subject {
                localities: strings(&["Austin"]),
                ..Subject::default()
            },
            DefaultSubject {
                locality: Some("Dallas".to_string()),
                ..DefaultSubject::default()
            },
        );
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inconsistent);
        assert!(err.to_string().contains("locality"));
    }

    #[test]
    fn allow_all_accepts_any_default() {
        let spec = with_subjects(
            Subject {
                countries: strings(&[ALLOW_ALL]),
                org_units: strings(&[ALLOW_ALL]),
                ..Subject::default()
            },
            DefaultSubject {
                country: Some("US".to_string()),
                org_units: strings(&["Eng", "Ops"]),
                ..DefaultSubject::default()
            },
        );
        assert!(validate_cloud_policy_specification(&spec).is_ok());
    }

    #[test]
    fn default_org_units_must_be_a_subset() {
        let spec = with_subjects(
            Subject {
                org_units: strings(&["Eng", "Ops"]),
                ..Subject::default()
            },
            DefaultSubject {
                org_units: strings(&["Eng", "Sales"]),
                ..DefaultSubject::default()
            },
        );
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert!(err.to_string().contains("orgUnits"));
    }

    #[test]
    fn default_key_values_must_be_policy_members() {
        let mut spec = with_key_pair(KeyPair {
            rsa_key_sizes: vec![2048, 4096],
            ..KeyPair::default()
        });
        spec.default = Some(PolicyDefaults {
            subject: None,
            key_pair: Some(DefaultKeyPair {
                rsa_key_size: Some(1024),
                ..DefaultKeyPair::default()
            }),
        });
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inconsistent);
        assert!(err.to_string().contains("rsaKeySize"));
    }

    #[test]
    fn standalone_defaults_are_checked() {
        let spec = PolicySpecification {
            default: Some(PolicyDefaults {
                subject: None,
                key_pair: Some(DefaultKeyPair {
                    key_type: Some("ECDSA".to_string()),
                    ..DefaultKeyPair::default()
                }),
            }),
            ..PolicySpecification::default()
        };
        assert!(validate_cloud_policy_specification(&spec).is_err());

        let spec = PolicySpecification {
            default: Some(PolicyDefaults {
                subject: None,
                key_pair: Some(DefaultKeyPair {
                    key_type: Some(String::new()),
                    rsa_key_size: Some(0),
                    ..DefaultKeyPair::default()
                }),
            }),
            ..PolicySpecification::default()
        };
        assert!(validate_cloud_policy_specification(&spec).is_ok());
    }

    #[test]
    fn defaults_are_checked_when_policy_key_pair_is_open() {
        let mut spec = with_key_pair(KeyPair {
            reuse_allowed: Some(true),
            ..KeyPair::default()
        });
        spec.default = Some(PolicyDefaults {
            subject: None,
            key_pair: Some(DefaultKeyPair {
                key_type: Some("ECDSA".to_string()),
                rsa_key_size: Some(3072),
                ..DefaultKeyPair::default()
            }),
        });
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
        assert!(err.to_string().contains("ECDSA"));

        spec.default.as_mut().unwrap().key_pair.as_mut().unwrap().key_type = Some("RSA".to_string());
        let err = validate_cloud_policy_specification(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
        assert!(err.to_string().contains("3072"));

        spec.default.as_mut().unwrap().key_pair.as_mut().unwrap().rsa_key_size = Some(4096);
        assert!(validate_cloud_policy_specification(&spec).is_ok());
    }
}
