//! Managed-PKI zone policy translation.
//!
//! [`build_tpp_policy`] folds enforced and default values into locked and
//! unlocked attributes; [`build_policy_specification_for_tpp`] unfolds them again.
//!
//! The reverse direction is lossy for SAN permissions: every SAN type missing
//! from the prohibited list comes back as explicitly allowed, even when the
//! original specification left it unset.

use crate::domain::specification::{first_non_empty, first_non_zero, non_empty};
use crate::domain::{
    DefaultKeyPair, DefaultSubject, KeyPair, LockedAttribute, Policy, PolicyDefaults,
    PolicySpecification, SanType, Subject, SubjectAltNames, TppPolicy,
};
use crate::errors::{PolicyError, Result};

const BACKEND: &str = "TPP";

/// Prefer the enforced value (locked), else the default (unlocked)
fn pick(policy_value: Option<&str>, default_value: Option<&str>) -> Option<LockedAttribute> {
    match (policy_value, default_value) {
        (Some(value), _) => Some(LockedAttribute::locked(value)),
        (None, Some(value)) => Some(LockedAttribute::unlocked(value)),
        (None, None) => None,
    }
}

fn flag(value: bool) -> i32 {
    i32::from(value)
}

fn bool_from_flag(attribute: &str, value: i32) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PolicyError::invalid_flag(attribute, other)),
    }
}

/// SAN types whose permission is explicitly `false`, or `None` when there are none
fn prohibited_san_types(sans: &SubjectAltNames) -> Option<Vec<String>> {
    let prohibited: Vec<String> = SanType::ALL
        .iter()
        .zip(sans.entries())
        .filter(|(_, (_, allowed))| *allowed == Some(false))
        .map(|(san_type, _)| san_type.tag().to_string())
        .collect();

    if prohibited.is_empty() {
        None
    } else {
        Some(prohibited)
    }
}

/// Expand a prohibited list back into five explicit permissions
fn resolve_subject_alt_names(prohibited: &[String]) -> SubjectAltNames {
    let prohibited: Vec<SanType> = prohibited.iter().filter_map(|tag| tag.parse().ok()).collect();
    let allowed = |san_type: SanType| Some(!prohibited.contains(&san_type));

    SubjectAltNames {
        dns_allowed: allowed(SanType::Dns),
        ip_allowed: allowed(SanType::Ip),
        email_allowed: allowed(SanType::Email),
        uri_allowed: allowed(SanType::Uri),
        upn_allowed: allowed(SanType::Upn),
    }
}

/// Translate a neutral specification into a zone policy document.
///
/// Total: callers are expected to have run the managed-PKI validator first.
pub fn build_tpp_policy(spec: &PolicySpecification) -> TppPolicy {
    let _span = crate::policy_span!("translate", BACKEND).entered();

    let policy = spec.policy.as_ref();
    let subject = spec.policy_subject();
    let key_pair = spec.policy_key_pair();
    let default_subject = spec.default_subject();
    let default_key_pair = spec.default_key_pair();

    let policy_size = key_pair.and_then(|k| first_non_zero(&k.rsa_key_sizes)).map(|s| s.to_string());
    let default_size = default_key_pair
        .and_then(|k| k.rsa_key_size)
        .filter(|s| *s != 0)
        .map(|s| s.to_string());

    let reuse = key_pair.and_then(|k| k.reuse_allowed).map(flag);

    let tpp_policy = TppPolicy {
        contact: spec.users.clone(),
        approver: spec.approvers.clone(),
        domain_suffix_whitelist: policy.map(|p| p.domains.clone()).unwrap_or_default(),
        prohibit_wildcard: policy.and_then(|p| p.wildcard_allowed).map(|allowed| flag(!allowed)),
        certificate_authority: policy.and_then(|p| p.certificate_authority.clone()),
        organization: pick(
            subject.and_then(|s| first_non_empty(&s.orgs)),
            default_subject.and_then(|d| non_empty(&d.org)),
        ),
        organizational_unit: pick(
            subject.and_then(|s| first_non_empty(&s.org_units)),
            default_subject.and_then(|d| first_non_empty(&d.org_units)),
        ),
        city: pick(
            subject.and_then(|s| first_non_empty(&s.localities)),
            default_subject.and_then(|d| non_empty(&d.locality)),
        ),
        state: pick(
            subject.and_then(|s| first_non_empty(&s.states)),
            default_subject.and_then(|d| non_empty(&d.state)),
        ),
        country: pick(
            subject.and_then(|s| first_non_empty(&s.countries)),
            default_subject.and_then(|d| non_empty(&d.country)),
        ),
        key_algorithm: pick(
            key_pair.and_then(|k| first_non_empty(&k.key_types)),
            default_key_pair.and_then(|d| non_empty(&d.key_type)),
        ),
        key_bit_strength: pick(policy_size.as_deref(), default_size.as_deref()),
        elliptic_curve: pick(
            key_pair.and_then(|k| first_non_empty(&k.elliptic_curves)),
            default_key_pair.and_then(|d| non_empty(&d.elliptic_curve)),
        ),
        manual_csr: pick(
            key_pair.and_then(|k| non_empty(&k.generation_type)),
            default_key_pair.and_then(|d| non_empty(&d.generation_type)),
        ),
        prohibited_san_type: policy
            .and_then(|p| p.subject_alt_names.as_ref())
            .and_then(prohibited_san_types),
        allow_private_key_reuse: reuse,
        want_renewal: reuse,
    };

    let (locked, unlocked) = tpp_policy.attribute_counts();
    tracing::debug!(locked, unlocked, "built zone policy");

    tpp_policy
}

/// Reconstruct a neutral specification from a zone policy document.
///
/// Fails when a 0/1 flag is out of range or the key size is not numeric.
pub fn build_policy_specification_for_tpp(tpp_policy: &TppPolicy) -> Result<PolicySpecification> {
    let _span = crate::policy_span!("reverse", BACKEND).entered();

    let wildcard_allowed = tpp_policy
        .prohibit_wildcard
        .map(|value| bool_from_flag("ProhibitWildcard", value).map(|prohibited| !prohibited))
        .transpose()?;

    let mut subject = Subject::default();
    let mut default_subject = DefaultSubject::default();
    let mut create_subject = false;
    let mut create_default_subject = false;

    let mut key_pair = KeyPair::default();
    let mut default_key_pair = DefaultKeyPair::default();
    let mut create_key_pair = false;
    let mut create_default_key_pair = false;

    if let Some(attribute) = &tpp_policy.organization {
        if attribute.locked {
            subject.orgs = vec![attribute.value.clone()];
            create_subject = true;
        } else {
            default_subject.org = Some(attribute.value.clone());
            create_default_subject = true;
        }
    }

    if let Some(attribute) = &tpp_policy.organizational_unit {
        if attribute.locked {
            subject.org_units = vec![attribute.value.clone()];
            create_subject = true;
        } else {
            default_subject.org_units = vec![attribute.value.clone()];
            create_default_subject = true;
        }
    }

    if let Some(attribute) = &tpp_policy.city {
        if attribute.locked {
            subject.localities = vec![attribute.value.clone()];
            create_subject = true;
        } else {
            default_subject.locality = Some(attribute.value.clone());
            create_default_subject = true;
        }
    }

    if let Some(attribute) = &tpp_policy.state {
        if attribute.locked {
            subject.states = vec![attribute.value.clone()];
            create_subject = true;
        } else {
            default_subject.state = Some(attribute.value.clone());
            create_default_subject = true;
        }
    }

    if let Some(attribute) = &tpp_policy.country {
        if attribute.locked {
            subject.countries = vec![attribute.value.clone()];
            create_subject = true;
        } else {
            default_subject.country = Some(attribute.value.clone());
            create_default_subject = true;
        }
    }

    if let Some(attribute) = &tpp_policy.key_algorithm {
        if attribute.locked {
            key_pair.key_types = vec![attribute.value.clone()];
            create_key_pair = true;
        } else {
            default_key_pair.key_type = Some(attribute.value.clone());
            create_default_key_pair = true;
        }
    }

    if let Some(attribute) = &tpp_policy.key_bit_strength {
        let size: u32 = attribute.value.parse().map_err(|e| {
            PolicyError::malformed_numeric("KeyBitStrength", attribute.value.as_str(), e)
        })?;
        if attribute.locked {
            key_pair.rsa_key_sizes = vec![size];
            create_key_pair = true;
        } else {
            default_key_pair.rsa_key_size = Some(size);
            create_default_key_pair = true;
        }
    }

    if let Some(attribute) = &tpp_policy.elliptic_curve {
        if attribute.locked {
            key_pair.elliptic_curves = vec![attribute.value.clone()];
            create_key_pair = true;
        } else {
            default_key_pair.elliptic_curve = Some(attribute.value.clone());
            create_default_key_pair = true;
        }
    }

    if let Some(attribute) = &tpp_policy.manual_csr {
        if attribute.locked {
            key_pair.generation_type = Some(attribute.value.clone());
            create_key_pair = true;
        } else {
            default_key_pair.generation_type = Some(attribute.value.clone());
            create_default_key_pair = true;
        }
    }

    // AllowPrivateKeyReuse wins over WantRenewal
    let reuse_flag = match (tpp_policy.allow_private_key_reuse, tpp_policy.want_renewal) {
        (Some(value), _) => Some(("AllowPrivateKeyReuse", value)),
        (None, Some(value)) => Some(("WantRenewal", value)),
        (None, None) => None,
    };
    if let Some((attribute, value)) = reuse_flag {
        key_pair.reuse_allowed = Some(bool_from_flag(attribute, value)?);
        create_key_pair = true;
    }

    let subject_alt_names = tpp_policy
        .prohibited_san_type
        .as_deref()
        .map(resolve_subject_alt_names);

    let policy = (create_subject || create_key_pair || subject_alt_names.is_some()).then(|| Policy {
        domains: tpp_policy.domain_suffix_whitelist.clone(),
        wildcard_allowed,
        certificate_authority: tpp_policy.certificate_authority.clone(),
        max_valid_days: None,
        subject: create_subject.then_some(subject),
        key_pair: create_key_pair.then_some(key_pair),
        subject_alt_names,
    });

    let default = (create_default_subject || create_default_key_pair).then(|| PolicyDefaults {
        subject: create_default_subject.then_some(default_subject),
        key_pair: create_default_key_pair.then_some(default_key_pair),
    });

    tracing::debug!(
        has_policy = policy.is_some(),
        has_default = default.is_some(),
        "rebuilt specification from zone policy"
    );

    Ok(PolicySpecification {
        users: tpp_policy.contact.clone(),
        approvers: tpp_policy.approver.clone(),
        policy,
        default,
    })
}
