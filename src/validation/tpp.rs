//! Managed-PKI specification rules.
//!
//! Every enforced list holds at most one value, values come from the TPP
//! constraint tables, and a default that is set alongside an enforced value must
//! equal it.

use crate::domain::constraints::{
    GENERATION_TYPES, TPP_ELLIPTIC_CURVES, TPP_KEY_TYPES, TPP_RSA_KEY_SIZES,
};
use crate::domain::specification::{first_non_empty, first_non_zero, non_empty};
use crate::domain::{DefaultKeyPair, KeyPair, PolicySpecification, Subject};
use crate::errors::{PolicyError, Result};
use crate::validation::{all_ints_allowed, all_strings_allowed};

const BACKEND: &str = "TPP";

/// Validate a specification destined for the managed-PKI backend
pub fn validate_tpp_policy_specification(spec: &PolicySpecification) -> Result<()> {
    let _span = crate::policy_span!("validate", BACKEND).entered();

    let result = run_rules(spec);
    match &result {
        Ok(()) => tracing::debug!("specification is valid"),
        Err(error) => tracing::debug!(%error, kind = %error.kind(), "specification rejected"),
    }
    result
}

fn run_rules(spec: &PolicySpecification) -> Result<()> {
    if let Some(subject) = spec.policy_subject() {
        validate_policy_subject(subject)?;
    }

    if let Some(key_pair) = spec.policy_key_pair() {
        validate_policy_key_pair(key_pair)?;
    }

    validate_default_subject(spec)?;
    validate_default_key_pair_with_policy(spec)?;

    if let Some(key_pair) = spec.default_key_pair() {
        validate_default_key_pair(key_pair)?;
    }

    Ok(())
}

fn at_most_one<T>(values: &[T], attribute: &str) -> Result<()> {
    if values.len() > 1 {
        return Err(PolicyError::cardinality(attribute));
    }
    Ok(())
}

fn validate_generation_type(value: &str, attribute: &str) -> Result<()> {
    if !all_strings_allowed(&[value], &GENERATION_TYPES[..]) {
        return Err(PolicyError::unsupported(attribute, value, BACKEND));
    }
    Ok(())
}

fn validate_policy_subject(subject: &Subject) -> Result<()> {
    at_most_one(&subject.orgs, "orgs")?;
    at_most_one(&subject.org_units, "orgUnits")?;
    at_most_one(&subject.localities, "localities")?;
    at_most_one(&subject.states, "states")?;
    at_most_one(&subject.countries, "countries")?;
    Ok(())
}

fn validate_policy_key_pair(key_pair: &KeyPair) -> Result<()> {
    at_most_one(&key_pair.key_types, "keyTypes")?;
    if !all_strings_allowed(&key_pair.key_types, &*TPP_KEY_TYPES) {
        return Err(PolicyError::unsupported("keyTypes", key_pair.key_types.join(","), BACKEND));
    }

    at_most_one(&key_pair.rsa_key_sizes, "rsaKeySizes")?;
    if !all_ints_allowed(&key_pair.rsa_key_sizes, &*TPP_RSA_KEY_SIZES) {
        let sizes: Vec<String> = key_pair.rsa_key_sizes.iter().map(u32::to_string).collect();
        return Err(PolicyError::unsupported("rsaKeySizes", sizes.join(","), BACKEND));
    }

    at_most_one(&key_pair.elliptic_curves, "ellipticCurves")?;
    if !all_strings_allowed(&key_pair.elliptic_curves, &*TPP_ELLIPTIC_CURVES) {
        return Err(PolicyError::unsupported(
            "ellipticCurves",
            key_pair.elliptic_curves.join(","),
            BACKEND,
        ));
    }

    if let Some(generation_type) = &key_pair.generation_type {
        validate_generation_type(generation_type, "generationType")?;
    }

    Ok(())
}

fn require_equal(attribute: &str, policy_value: Option<&str>, default_value: Option<&str>) -> Result<()> {
    match (policy_value, default_value) {
        (Some(enforced), Some(recommended)) if enforced != recommended => {
            Err(PolicyError::inconsistent(
                attribute,
                format!("default value '{}' doesn't match policy value '{}'", recommended, enforced),
            ))
        }
        _ => Ok(()),
    }
}

fn validate_default_subject(spec: &PolicySpecification) -> Result<()> {
    let Some(default_subject) = spec.default_subject() else {
        return Ok(());
    };

    at_most_one(&default_subject.org_units, "default orgUnits")?;

    let Some(subject) = spec.policy_subject() else {
        return Ok(());
    };

    require_equal("org", first_non_empty(&subject.orgs), non_empty(&default_subject.org))?;
    require_equal(
        "orgUnits",
        first_non_empty(&subject.org_units),
        first_non_empty(&default_subject.org_units),
    )?;
    require_equal(
        "locality",
        first_non_empty(&subject.localities),
        non_empty(&default_subject.locality),
    )?;
    require_equal("state", first_non_empty(&subject.states), non_empty(&default_subject.state))?;
    require_equal(
        "country",
        first_non_empty(&subject.countries),
        non_empty(&default_subject.country),
    )?;

    Ok(())
}

fn validate_default_key_pair_with_policy(spec: &PolicySpecification) -> Result<()> {
    let (Some(key_pair), Some(default_key_pair)) = (spec.policy_key_pair(), spec.default_key_pair())
    else {
        return Ok(());
    };

    require_equal(
        "keyType",
        first_non_empty(&key_pair.key_types),
        non_empty(&default_key_pair.key_type),
    )?;

    let policy_size = first_non_zero(&key_pair.rsa_key_sizes).map(|s| s.to_string());
    let default_size = default_key_pair.rsa_key_size.filter(|s| *s != 0).map(|s| s.to_string());
    require_equal("rsaKeySize", policy_size.as_deref(), default_size.as_deref())?;

    require_equal(
        "ellipticCurve",
        first_non_empty(&key_pair.elliptic_curves),
        non_empty(&default_key_pair.elliptic_curve),
    )?;
    require_equal(
        "generationType",
        non_empty(&key_pair.generation_type),
        non_empty(&default_key_pair.generation_type),
    )?;

    Ok(())
}

fn validate_default_key_pair(key_pair: &DefaultKeyPair) -> Result<()> {
    if let Some(key_type) = non_empty(&key_pair.key_type) {
        if !all_strings_allowed(&[key_type], &*TPP_KEY_TYPES) {
            return Err(PolicyError::unsupported("default keyType", key_type, BACKEND));
        }
    }

    if let Some(size) = key_pair.rsa_key_size.filter(|s| *s > 0) {
        if !all_ints_allowed(&[size], &*TPP_RSA_KEY_SIZES) {
            return Err(PolicyError::unsupported("default rsaKeySize", size, BACKEND));
        }
    }

    if let Some(curve) = non_empty(&key_pair.elliptic_curve) {
        if !all_strings_allowed(&[curve], &*TPP_ELLIPTIC_CURVES) {
            return Err(PolicyError::unsupported("default ellipticCurve", curve, BACKEND));
        }
    }

    if let Some(generation_type) = non_empty(&key_pair.generation_type) {
        validate_generation_type(generation_type, "default generationType")?;
    }

    Ok(())
}
