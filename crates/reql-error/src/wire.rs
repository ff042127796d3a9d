//! Errors raised at the wire boundary, on the way out and on the way back in.

/// A stored value that has no exact wire representation.
///
/// The tree is left untouched; since terms are immutable the caller rebuilds
/// the offending subtree and serializes again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializationError {
    #[error("integer {value} is outside the exactly representable wire range (+/- 2^53)")]
    UnsafeInteger { value: String },

    #[error("number {value} cannot be represented on the wire")]
    NonFinite { value: f64 },

    #[error("JSON encoding failed: {0}")]
    Json(String),
}

/// A wire payload that does not describe a term tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown term type code {0}")]
    UnknownTermType(i64),

    #[error("expected a literal value, found a {term} term")]
    NotLiteral { term: String },

    #[error("malformed term payload: {0}")]
    Malformed(String),
}
