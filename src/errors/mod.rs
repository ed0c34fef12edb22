//! # Error Handling
//!
//! Error taxonomy for policy validation and translation. Every failure is
//! reported as the first violation found; the `Display` output is meant to be
//! surfaced verbatim to the end user.

use std::fmt;
use std::num::ParseIntError;

/// Custom result type for policy operations
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Main error type for policy validation and translation
#[derive(thiserror::Error, Debug)]
pub enum PolicyError {
    /// A list-typed enforced attribute carries more than one value
    #[error("attribute {attribute} has more than one value")]
    Cardinality { attribute: String },

    /// A value outside the backend's constraint table
    #[error("specified {attribute} value {value} is not supported on {backend}")]
    UnsupportedValue {
        attribute: String,
        value: String,
        backend: String,
    },

    /// Enforced and default values for the same attribute disagree
    #[error("policy default {attribute} is inconsistent: {message}")]
    Inconsistent { attribute: String, message: String },

    /// Composite identifier with too few (or empty) components
    #[error("identifier '{value}' is invalid, please provide a valid value with this structure: {expected}")]
    MalformedIdentifier { value: String, expected: String },

    /// A value expected to be an integer is not
    #[error("attribute {attribute} value '{value}' is not a valid number")]
    MalformedNumeric {
        attribute: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A 0/1 flag carrying an out-of-range value
    #[error("attribute {attribute} value {value} is not a supported value, expected 0 or 1")]
    InvalidFlag { attribute: String, value: i32 },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Coarse classification of a [`PolicyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Cardinality,
    UnsupportedValue,
    Inconsistent,
    MalformedIdentifier,
    MalformedNumeric,
    InvalidFlag,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Cardinality => write!(f, "cardinality"),
            ErrorKind::UnsupportedValue => write!(f, "unsupported_value"),
            ErrorKind::Inconsistent => write!(f, "inconsistent"),
            ErrorKind::MalformedIdentifier => write!(f, "malformed_identifier"),
            ErrorKind::MalformedNumeric => write!(f, "malformed_numeric"),
            ErrorKind::InvalidFlag => write!(f, "invalid_flag"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

impl PolicyError {
    /// Create a cardinality error
    pub fn cardinality<S: Into<String>>(attribute: S) -> Self {
        Self::Cardinality {
            attribute: attribute.into(),
        }
    }

    /// Create an unsupported value error
    pub fn unsupported<A, V, B>(attribute: A, value: V, backend: B) -> Self
    where
        A: Into<String>,
        V: ToString,
        B: Into<String>,
    {
        Self::UnsupportedValue {
            attribute: attribute.into(),
            value: value.to_string(),
            backend: backend.into(),
        }
    }

    /// Create an inconsistency error
    pub fn inconsistent<A: Into<String>, M: Into<String>>(attribute: A, message: M) -> Self {
        Self::Inconsistent {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a malformed identifier error
    pub fn malformed_identifier<V: Into<String>, E: Into<String>>(value: V, expected: E) -> Self {
        Self::MalformedIdentifier {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a malformed numeric error
    pub fn malformed_numeric<A: Into<String>, V: Into<String>>(
        attribute: A,
        value: V,
        source: ParseIntError,
    ) -> Self {
        Self::MalformedNumeric {
            attribute: attribute.into(),
            value: value.into(),
            source,
        }
    }

    /// Create an invalid flag error
    pub fn invalid_flag<A: Into<String>>(attribute: A, value: i32) -> Self {
        Self::InvalidFlag {
            attribute: attribute.into(),
            value,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::Cardinality { .. } => ErrorKind::Cardinality,
            PolicyError::UnsupportedValue { .. } => ErrorKind::UnsupportedValue,
            PolicyError::Inconsistent { .. } => ErrorKind::Inconsistent,
            PolicyError::MalformedIdentifier { .. } => ErrorKind::MalformedIdentifier,
            PolicyError::MalformedNumeric { .. } => ErrorKind::MalformedNumeric,
            PolicyError::InvalidFlag { .. } => ErrorKind::InvalidFlag,
            PolicyError::Config { .. } => ErrorKind::Config,
        }
    }
}

impl From<config::ConfigError> for PolicyError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for PolicyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages("", &errors, &mut messages);

        Self::config(format!("Validation failed: {}", messages.join("; ")))
    }
}

/// Flatten nested validator errors into `path.field: message` entries
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    messages: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                messages.push(format!("{}{}: {}", prefix, field, error_messages.join(", ")));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_validation_messages(&format!("{}{}.", prefix, field), inner, messages);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_messages(
                        &format!("{}{}[{}].", prefix, field, index),
                        inner,
                        messages,
                    );
                }
            }
        }
    }
}
