//! Bitwise anonymization strategy
//!
//! Two keys drive the transform. The primary key is expanded with SHA-256 and
//! the secondary key with SHA-512 into 2048-byte streams. The mask byte at
//! position `p` combines both:
//!
//! ```text
//! mask(p) = primary[p % 2048] ^ (secondary[p % 2048] + p) mod 256
//! ```
//!
//! Numeric values work on a 64-bit lane: `rotl(bits ^ mask, rotation)`.
//!
//! Width handling:
//! - `Integer` and `Float` are exactly one lane (`Float` via `to_bits`), masked
//!   with `mask(0..8)`.
//! - `Identifier` is 128 bits; the high half uses `mask(0..8)` and the low half
//!   `mask(8..16)`.
//! - `Text` is processed byte by byte on the 7-bit ASCII lane: an ASCII byte at
//!   offset `i` is XORed with `mask(i) & 0x7F`, and bytes of multi-byte UTF-8
//!   sequences are left as they are. Output stays valid UTF-8 with the same
//!   byte length. No rotation is applied to text.
//!
//! Every case is reversible; see [`BitwiseStrategy::decode_value`].

use super::Anonymizer;
use crate::anonymization::config::{AnonymizationMethod, FieldSelection};
use crate::config::SecretKey;
use crate::domain::{BenchError, Dataset, FieldValue, Result};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256, Sha512};
use uuid::Uuid;

/// Length of each derived key stream in bytes
pub const KEY_STREAM_LEN: usize = 2048;

/// Derives `length` pseudorandom bytes from `key` with the digest `D`
///
/// `h0 = key`, `h(n) = D(h(n-1) || key)`; the digests are concatenated and
/// truncated.
pub fn key_stream<D: Digest>(key: &[u8], length: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(length + 64);
    let mut current = key.to_vec();

    while stream.len() < length {
        let mut hasher = D::new();
        hasher.update(&current);
        hasher.update(key);
        current = hasher.finalize().to_vec();
        stream.extend_from_slice(&current);
    }

    stream.truncate(length);
    stream
}

/// Bit-manipulation strategy - masks and rotates each value's binary form
pub struct BitwiseStrategy {
    primary: Vec<u8>,
    secondary: Vec<u8>,
    mask_hi: u64,
    mask_lo: u64,
    rotation: u32,
    fields: FieldSelection,
}

impl BitwiseStrategy {
    /// Create a new bitwise strategy
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Configuration`] if `rotation` is outside 1..=63
    /// or either key is empty.
    pub fn new(
        key: &SecretKey,
        secondary_key: &SecretKey,
        rotation: u32,
        fields: FieldSelection,
    ) -> Result<Self> {
        if !(1..=63).contains(&rotation) {
            return Err(BenchError::Configuration(format!(
                "bitwise rotation must be between 1 and 63, got {rotation}"
            )));
        }
        let key = key.expose_secret();
        let secondary_key = secondary_key.expose_secret();
        if key.is_empty() || secondary_key.is_empty() {
            return Err(BenchError::Configuration(
                "bitwise keys cannot be empty".to_string(),
            ));
        }

        let mut strategy = Self {
            primary: key_stream::<Sha256>(key.as_bytes(), KEY_STREAM_LEN),
            secondary: key_stream::<Sha512>(secondary_key.as_bytes(), KEY_STREAM_LEN),
            mask_hi: 0,
            mask_lo: 0,
            rotation,
            fields,
        };
        strategy.mask_hi = strategy.lane_mask(0);
        strategy.mask_lo = strategy.lane_mask(8);
        Ok(strategy)
    }

    /// Transform one value
    pub fn encode_value(&self, value: &FieldValue) -> FieldValue {
        match value {
            FieldValue::Integer(v) => {
                FieldValue::Integer(self.forward(*v as u64, self.mask_hi) as i64)
            }
            FieldValue::Float(v) => {
                FieldValue::Float(f64::from_bits(self.forward(v.to_bits(), self.mask_hi)))
            }
            FieldValue::Identifier(u) => {
                let (hi, lo) = split(u.as_u128());
                let hi = self.forward(hi, self.mask_hi);
                let lo = self.forward(lo, self.mask_lo);
                FieldValue::Identifier(join(hi, lo))
            }
            FieldValue::Text(s) => FieldValue::Text(self.xor_text(s)),
        }
    }

    /// Inverse of [`encode_value`](Self::encode_value)
    pub fn decode_value(&self, value: &FieldValue) -> FieldValue {
        match value {
            FieldValue::Integer(v) => {
                FieldValue::Integer(self.backward(*v as u64, self.mask_hi) as i64)
            }
            FieldValue::Float(v) => {
                FieldValue::Float(f64::from_bits(self.backward(v.to_bits(), self.mask_hi)))
            }
            FieldValue::Identifier(u) => {
                let (hi, lo) = split(u.as_u128());
                let hi = self.backward(hi, self.mask_hi);
                let lo = self.backward(lo, self.mask_lo);
                FieldValue::Identifier(join(hi, lo))
            }
            // XOR is its own inverse
            FieldValue::Text(s) => FieldValue::Text(self.xor_text(s)),
        }
    }

    /// Mask byte at `position`, mixing both key streams
    fn mask(&self, position: usize) -> u8 {
        let i = position % KEY_STREAM_LEN;
        self.primary[i] ^ self.secondary[i].wrapping_add(position as u8)
    }

    fn lane_mask(&self, offset: usize) -> u64 {
        let mut bytes = [0u8; 8];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.mask(offset + i);
        }
        u64::from_be_bytes(bytes)
    }

    fn forward(&self, bits: u64, mask: u64) -> u64 {
        (bits ^ mask).rotate_left(self.rotation)
    }

    fn backward(&self, bits: u64, mask: u64) -> u64 {
        bits.rotate_right(self.rotation) ^ mask
    }

    fn xor_text(&self, text: &str) -> String {
        text.char_indices()
            .map(|(offset, c)| {
                if c.is_ascii() {
                    char::from(c as u8 ^ (self.mask(offset) & 0x7F))
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Anonymizer for BitwiseStrategy {
    fn method(&self) -> AnonymizationMethod {
        AnonymizationMethod::Bitwise
    }

    fn anonymize(&self, dataset: &Dataset) -> Result<Dataset> {
        Ok(dataset.map_values(
            |field| self.fields.includes(field),
            |_, value| self.encode_value(value),
        ))
    }

    fn deanonymize(&self, dataset: &Dataset) -> Result<Dataset> {
        Ok(dataset.map_values(
            |field| self.fields.includes(field),
            |_, value| self.decode_value(value),
        ))
    }
}

fn split(v: u128) -> (u64, u64) {
    ((v >> 64) as u64, v as u64)
}

fn join(hi: u64, lo: u64) -> Uuid {
    Uuid::from_u128(((hi as u128) << 64) | lo as u128)
}
