//! Error types for forecast normalization

use thiserror::Error;

/// Errors raised while normalizing a provider forecast payload.
///
/// An empty payload is not an error; `normalize` returns an empty sequence
/// and the caller decides how to present "no data".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// A required field (timestamp or temperature) is absent from an entry.
    #[error("Malformed payload: entry {index} is missing required field `{field}`")]
    MalformedPayload { index: usize, field: &'static str },

    /// The payload's JSON types do not match the provider contract.
    #[error("Payload does not match the provider shape: {0}")]
    InvalidShape(String),

    /// Two entries of the same payload share a timestamp.
    #[error("Malformed payload: entry {index} repeats an earlier timestamp")]
    DuplicateTimestamp { index: usize },

    /// A numeric field is outside its physical range.
    #[error("Malformed payload: entry {index} has invalid `{field}`: {reason}")]
    OutOfRange {
        index: usize,
        field: &'static str,
        reason: &'static str,
    },
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::InvalidShape(err.to_string())
    }
}

/// Error returned when parsing a closed enumeration from free text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseVariantError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
