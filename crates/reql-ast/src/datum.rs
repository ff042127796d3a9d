//! Literal leaves of the term tree.

use std::fmt;

use reql_error::SerializationError;
use serde_json::Value;

/// Largest integer magnitude a double holds exactly (2^53).
pub const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// The single numeric literal kind.
///
/// Integers and floats are both "numbers" on the wire. The original width is
/// kept so that no precision is lost before serialization decides whether
/// the value is representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    /// Keeps integers exact when the JSON number has no fractional part.
    pub(crate) fn from_json(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            // serde_json only builds finite floats
            Number::Float(n.as_f64().unwrap_or_default())
        }
    }

    pub(crate) fn to_wire(self) -> Result<Value, SerializationError> {
        match self {
            Number::Int(n) if n.unsigned_abs() <= MAX_SAFE_INTEGER => Ok(Value::from(n)),
            Number::UInt(n) if n <= MAX_SAFE_INTEGER => Ok(Value::from(n)),
            Number::Int(n) => Err(SerializationError::UnsafeInteger {
                value: n.to_string(),
            }),
            Number::UInt(n) => Err(SerializationError::UnsafeInteger {
                value: n.to_string(),
            }),
            Number::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or(SerializationError::NonFinite { value: f }),
        }
    }
}

/// A literal value stored in a `DATUM` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Datum {
    pub(crate) fn to_wire(&self) -> Result<Value, SerializationError> {
        Ok(match self {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(*b),
            Datum::Number(n) => n.to_wire()?,
            Datum::String(s) => Value::String(s.clone()),
        })
    }

    /// Short description of the literal's shape, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "bool",
            Datum::Number(_) => "number",
            Datum::String(_) => "string",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::UInt(n) => write!(f, "{n}"),
            Number::Float(n) => write!(f, "{n}"),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("null"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Number(n) => write!(f, "{n}"),
            Datum::String(s) => write!(f, "{s:?}"),
        }
    }
}
