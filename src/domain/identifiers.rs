//! Composite identifier parsing
//!
//! Certificate-authority and zone identifiers are path-like strings whose
//! components are joined by a backslash.

use crate::errors::{PolicyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component delimiter for composite identifiers
pub const PATH_DELIMITER: char = '\\';

const CA_SHAPE: &str = "ca_type\\ca_account_key\\vendor_product_name";
const ZONE_SHAPE: &str = "application\\policy_name";

/// Parsed `ca_type\ca_account_key\vendor_product_name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthorityInfo {
    pub ca_type: String,

    pub ca_account_key: String,

    pub vendor_product_name: String,
}

impl FromStr for CertificateAuthorityInfo {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(PATH_DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(ca_type), Some(ca_account_key), Some(vendor_product_name)) => Ok(Self {
                ca_type: ca_type.to_string(),
                ca_account_key: ca_account_key.to_string(),
                vendor_product_name: vendor_product_name.to_string(),
            }),
            _ => Err(PolicyError::malformed_identifier(s, CA_SHAPE)),
        }
    }
}

impl fmt::Display for CertificateAuthorityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.ca_type, PATH_DELIMITER, self.ca_account_key, PATH_DELIMITER, self.vendor_product_name
        )
    }
}

/// Parse a certificate-authority identifier
pub fn get_cert_authority_info(certificate_authority: &str) -> Result<CertificateAuthorityInfo> {
    certificate_authority.parse()
}

/// Parsed `application\policy_name` zone identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonePath {
    application: String,
    cit_name: String,
}

impl ZonePath {
    /// Application component
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Issuing template (policy) component
    pub fn cit_name(&self) -> &str {
        &self.cit_name
    }

    /// Everything before the last delimiter of a zone path
    pub fn parent(path: &str) -> Result<&str> {
        path.rfind(PATH_DELIMITER)
            .map(|index| &path[..index])
            .ok_or_else(|| PolicyError::malformed_identifier(path, "parent\\name"))
    }
}

impl FromStr for ZonePath {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(PATH_DELIMITER);
        match (parts.next(), parts.next()) {
            (Some(application), Some(cit_name)) if !application.is_empty() && !cit_name.is_empty() => {
                Ok(Self {
                    application: application.to_string(),
                    cit_name: cit_name.to_string(),
                })
            }
            _ => Err(PolicyError::malformed_identifier(s, ZONE_SHAPE)),
        }
    }
}

impl fmt::Display for ZonePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.application, PATH_DELIMITER, self.cit_name)
    }
}

/// Application component of a zone identifier
pub fn get_application_name(zone: &str) -> Result<String> {
    zone.parse::<ZonePath>().map(|z| z.application)
}

/// Issuing template component of a zone identifier
pub fn get_cit_name(zone: &str) -> Result<String> {
    zone.parse::<ZonePath>().map(|z| z.cit_name)
}
