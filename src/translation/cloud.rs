//! Cloud issuing-template request translation.

use crate::domain::constraints::{ALLOW_ALL, CLOUD_KEY_TYPE, DEFAULT_RSA_KEY_SIZE};
use crate::domain::specification::non_empty;
use crate::domain::{
    get_cert_authority_info, CloudPolicyRequest, KeyTypes, PolicySpecification, Product,
    RecommendedKey, RecommendedSettings,
};
use crate::errors::Result;

const BACKEND: &str = "cloud";

/// Turn literal domains into suffix-matching regexes: `example.com` becomes
/// `.*\.example\.com`.
pub fn convert_to_regex(domains: &[String]) -> Vec<String> {
    domains
        .iter()
        .map(|domain| format!(".*\\.{}", domain.replace('.', "\\.")))
        .collect()
}

/// The policy's values, or the single allow-all pattern when there are none
fn or_allow_all(values: Option<&Vec<String>>) -> Vec<String> {
    match values {
        Some(values) if !values.is_empty() => values.clone(),
        _ => vec![ALLOW_ALL.to_string()],
    }
}

/// Build a cloud issuing-template request from a neutral specification.
///
/// Fails when the policy has no certificate authority or it is malformed.
pub fn build_cloud_cit_request(spec: &PolicySpecification) -> Result<CloudPolicyRequest> {
    let _span = crate::policy_span!("translate", BACKEND).entered();

    let policy = spec.policy.as_ref();
    let subject = spec.policy_subject();
    let key_pair = spec.policy_key_pair();

    let certificate_authority = policy
        .and_then(|p| p.certificate_authority.as_deref())
        .unwrap_or_default();
    let ca_info = get_cert_authority_info(certificate_authority)?;

    let validity_days = policy.and_then(|p| p.max_valid_days).unwrap_or(0);
    let product = Product {
        certificate_authority: ca_info.ca_type.clone(),
        product_name: ca_info.vendor_product_name.clone(),
        validity_period: format!("P{}D", validity_days),
    };

    let domain_regexes = match policy {
        Some(p) if !p.domains.is_empty() => convert_to_regex(&p.domains),
        _ => vec![ALLOW_ALL.to_string()],
    };

    let key_type = key_pair
        .and_then(|k| k.key_types.first())
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| CLOUD_KEY_TYPE.to_string());

    let key_lengths = match key_pair {
        Some(k) if !k.rsa_key_sizes.is_empty() => k.rsa_key_sizes.clone(),
        _ => vec![spec
            .default_key_pair()
            .and_then(|d| d.rsa_key_size)
            .filter(|s| *s != 0)
            .unwrap_or(DEFAULT_RSA_KEY_SIZE)],
    };

    let request = CloudPolicyRequest {
        certificate_authority: ca_info.ca_type,
        product,
        subject_cn_regexes: domain_regexes.clone(),
        san_regexes: domain_regexes,
        subject_o_regexes: or_allow_all(subject.map(|s| &s.orgs)),
        subject_ou_regexes: or_allow_all(subject.map(|s| &s.org_units)),
        subject_l_regexes: or_allow_all(subject.map(|s| &s.localities)),
        subject_st_regexes: or_allow_all(subject.map(|s| &s.states)),
        subject_c_values: or_allow_all(subject.map(|s| &s.countries)),
        key_types: vec![KeyTypes {
            key_type,
            key_lengths,
        }],
        key_reuse: key_pair.and_then(|k| k.reuse_allowed).unwrap_or(false),
        recommended_settings: recommended_settings(spec),
    };

    tracing::debug!(
        ca_type = %request.certificate_authority,
        validity = %request.product.validity_period,
        recommended = request.recommended_settings.is_some(),
        "built issuing template request"
    );

    Ok(request)
}

/// Recommended values derived from the defaults; `None` when no default is set
fn recommended_settings(spec: &PolicySpecification) -> Option<RecommendedSettings> {
    let default_subject = spec.default_subject();

    let key = spec.default_key_pair().and_then(|d| {
        non_empty(&d.key_type).map(|key_type| RecommendedKey {
            key_type: key_type.to_string(),
            length: d.rsa_key_size.filter(|s| *s != 0).unwrap_or(DEFAULT_RSA_KEY_SIZE),
        })
    });

    let settings = RecommendedSettings {
        subject_o_value: default_subject.and_then(|d| non_empty(&d.org)).map(str::to_string),
        subject_ou_value: default_subject
            .and_then(|d| d.org_units.first())
            .filter(|v| !v.is_empty())
            .cloned(),
        subject_l_value: default_subject.and_then(|d| non_empty(&d.locality)).map(str::to_string),
        subject_st_value: default_subject.and_then(|d| non_empty(&d.state)).map(str::to_string),
        subject_c_value: default_subject.and_then(|d| non_empty(&d.country)).map(str::to_string),
        key,
        key_reuse: false,
    };

    let any_set = settings.subject_o_value.is_some()
        || settings.subject_ou_value.is_some()
        || settings.subject_l_value.is_some()
        || settings.subject_st_value.is_some()
        || settings.subject_c_value.is_some()
        || settings.key.is_some();

    any_set.then_some(settings)
}
