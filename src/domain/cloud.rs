//! Cloud issuing-template policy request
//!
//! Regex oriented: every subject constraint is a list of patterns, where the
//! single pattern [`ALLOW_ALL`](crate::domain::constraints::ALLOW_ALL) means
//! "unconstrained".

use serde::{Deserialize, Serialize};

/// Request body for creating or updating an issuing template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudPolicyRequest {
    /// CA type, e.g. `DIGICERT`
    pub certificate_authority: String,

    pub product: Product,

    #[serde(rename = "subjectCNRegexes")]
    pub subject_cn_regexes: Vec<String>,

    pub san_regexes: Vec<String>,

    #[serde(rename = "subjectORegexes")]
    pub subject_o_regexes: Vec<String>,

    #[serde(rename = "subjectOURegexes")]
    pub subject_ou_regexes: Vec<String>,

    #[serde(rename = "subjectLRegexes")]
    pub subject_l_regexes: Vec<String>,

    #[serde(rename = "subjectSTRegexes")]
    pub subject_st_regexes: Vec<String>,

    /// Literal country values (not patterns)
    #[serde(rename = "subjectCValues")]
    pub subject_c_values: Vec<String>,

    pub key_types: Vec<KeyTypes>,

    pub key_reuse: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_settings: Option<RecommendedSettings>,
}

/// Vendor product the template issues from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub certificate_authority: String,

    pub product_name: String,

    /// ISO-8601 style `P<days>D`
    pub validity_period: String,
}

/// Allowed key type with its permitted lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTypes {
    pub key_type: String,

    pub key_lengths: Vec<u32>,
}

/// Values pre-filled into requests that leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSettings {
    #[serde(default, rename = "subjectOValue", skip_serializing_if = "Option::is_none")]
    pub subject_o_value: Option<String>,

    #[serde(default, rename = "subjectOUValue", skip_serializing_if = "Option::is_none")]
    pub subject_ou_value: Option<String>,

    #[serde(default, rename = "subjectLValue", skip_serializing_if = "Option::is_none")]
    pub subject_l_value: Option<String>,

    #[serde(default, rename = "subjectSTValue", skip_serializing_if = "Option::is_none")]
    pub subject_st_value: Option<String>,

    #[serde(default, rename = "subjectCValue", skip_serializing_if = "Option::is_none")]
    pub subject_c_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<RecommendedKey>,

    pub key_reuse: bool,
}

/// Recommended key type and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedKey {
    #[serde(rename = "type")]
    pub key_type: String,

    pub length: u32,
}
