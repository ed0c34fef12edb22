//! Managed-PKI zone policy document
//!
//! A flat record of locked attributes. A locked attribute came from an enforced
//! policy value; an unlocked one came from a recommended default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A value together with whether the zone enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockedAttribute {
    pub value: String,
    pub locked: bool,
}

impl LockedAttribute {
    /// Attribute enforced by the zone
    pub fn locked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            locked: true,
        }
    }

    /// Attribute used only as a pre-filled value
    pub fn unlocked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            locked: false,
        }
    }
}

/// Zone policy document as exchanged with the managed-PKI backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TppPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approver: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_suffix_whitelist: Vec<String>,

    /// Inverted wildcard permission: `0` allows wildcards, `1` prohibits them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibit_wildcard: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<LockedAttribute>,

    /// RSA key size rendered as decimal text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_bit_strength: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elliptic_curve: Option<LockedAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_csr: Option<LockedAttribute>,

    /// SAN types that requests may not carry; absent when nothing is prohibited
    #[serde(default, rename = "ProhibitedSANType", skip_serializing_if = "Option::is_none")]
    pub prohibited_san_type: Option<Vec<String>>,

    /// Kept in lockstep with `want_renewal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_private_key_reuse: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub want_renewal: Option<i32>,
}

impl TppPolicy {
    /// Number of locked and unlocked attributes present in the document
    pub fn attribute_counts(&self) -> (usize, usize) {
        let attributes = [
            &self.organization,
            &self.organizational_unit,
            &self.city,
            &self.state,
            &self.country,
            &self.key_algorithm,
            &self.key_bit_strength,
            &self.elliptic_curve,
            &self.manual_csr,
        ];

        attributes.iter().filter_map(|a| a.as_ref()).fold((0, 0), |(locked, unlocked), a| {
            if a.locked {
                (locked + 1, unlocked)
            } else {
                (locked, unlocked + 1)
            }
        })
    }
}

/// SAN type tags used in the prohibited list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanType {
    Dns,
    Ip,
    Email,
    Uri,
    Upn,
}

impl SanType {
    /// All SAN types in document order
    pub const ALL: [SanType; 5] = [SanType::Dns, SanType::Ip, SanType::Email, SanType::Uri, SanType::Upn];

    /// Tag written into the prohibited list
    pub fn tag(&self) -> &'static str {
        match self {
            SanType::Dns => "DNS",
            SanType::Ip => "IP",
            SanType::Email => "Email",
            SanType::Uri => "URI",
            SanType::Upn => "UPN",
        }
    }
}

impl fmt::Display for SanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SanType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("unknown SAN type '{}'", s))
    }
}
