//! Scalar field values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A single scalar subject to anonymization
///
/// `Float` compares and hashes by its IEEE-754 bit pattern, so every value
/// (NaN included) can serve as a multiset key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Identifier(Uuid),
}

impl FieldValue {
    /// Stable one-byte tag per variant, used when hashing values
    pub fn type_tag(&self) -> u8 {
        match self {
            FieldValue::Text(_) => b'S',
            FieldValue::Integer(_) => b'I',
            FieldValue::Float(_) => b'F',
            FieldValue::Identifier(_) => b'U',
        }
    }

    /// Human-readable variant name
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Identifier(_) => "identifier",
        }
    }

    /// Canonical byte encoding of the value
    ///
    /// Text is its UTF-8 bytes; numbers are big-endian fixed width;
    /// identifiers are their 16 raw bytes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            FieldValue::Text(s) => s.as_bytes().to_vec(),
            FieldValue::Integer(v) => v.to_be_bytes().to_vec(),
            FieldValue::Float(v) => v.to_bits().to_be_bytes().to_vec(),
            FieldValue::Identifier(u) => u.as_bytes().to_vec(),
        }
    }

    /// Whether two values are of the same variant
    pub fn same_type(&self, other: &FieldValue) -> bool {
        self.type_tag() == other.type_tag()
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Identifier(a), FieldValue::Identifier(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_tag().hash(state);
        match self {
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Integer(v) => v.hash(state),
            FieldValue::Float(v) => v.to_bits().hash(state),
            FieldValue::Identifier(u) => u.hash(state),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Identifier(u) => write!(f, "{u}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        FieldValue::Identifier(u)
    }
}
