//! Deterministic anonymization strategy
//!
//! Each value is replaced by a token derived from
//! `SHA-256(len(key) || key || field || 0x00 || type_tag || value_bytes)`.
//! The mapping is stable for a given key, so equal inputs in a column always
//! produce equal outputs, and it is one-way.

use super::Anonymizer;
use crate::anonymization::config::{AnonymizationMethod, FieldSelection};
use crate::config::SecretKey;
use crate::domain::{Dataset, FieldValue, Result};
use secrecy::ExposeSecret;
use sha2::digest::Output;
use sha2::{Digest, Sha256};

/// Hex characters kept for text tokens
const TEXT_TOKEN_LEN: usize = 32;

/// Keyed-hash strategy - replaces values with stable pseudonyms of the same type
pub struct DeterministicStrategy {
    /// Hasher already fed with the length-prefixed key
    keyed: Sha256,
    fields: FieldSelection,
}

impl DeterministicStrategy {
    /// Create a new deterministic strategy
    pub fn new(key: &SecretKey, fields: FieldSelection) -> Self {
        let key = key.expose_secret().as_bytes();
        let mut keyed = Sha256::new();
        keyed.update((key.len() as u64).to_be_bytes());
        keyed.update(key);
        Self { keyed, fields }
    }

    /// Anonymize one value of `field`
    pub fn anonymize_value(&self, field: &str, value: &FieldValue) -> FieldValue {
        let digest = self.digest(field, value);

        match value {
            FieldValue::Text(_) => {
                let mut token = format!("{digest:x}");
                token.truncate(TEXT_TOKEN_LEN);
                FieldValue::Text(token)
            }
            FieldValue::Integer(_) => FieldValue::Integer(i64::from_be_bytes(prefix(&digest))),
            // 53 bits fit an f64 mantissa exactly, so the result is never NaN or inf
            FieldValue::Float(_) => {
                FieldValue::Float((u64::from_be_bytes(prefix(&digest)) >> 11) as f64)
            }
            FieldValue::Identifier(_) => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(&digest[..16]);
                FieldValue::Identifier(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }
        }
    }

    fn digest(&self, field: &str, value: &FieldValue) -> Output<Sha256> {
        let mut hasher = self.keyed.clone();
        hasher.update(field.as_bytes());
        hasher.update([0u8, value.type_tag()]);
        hasher.update(value.canonical_bytes());
        hasher.finalize()
    }
}

impl Anonymizer for DeterministicStrategy {
    fn method(&self) -> AnonymizationMethod {
        AnonymizationMethod::Deterministic
    }

    fn anonymize(&self, dataset: &Dataset) -> Result<Dataset> {
        Ok(dataset.map_values(
            |field| self.fields.includes(field),
            |field, value| self.anonymize_value(field, value),
        ))
    }
}

fn prefix(digest: &[u8]) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    bytes
}
