//! Secret key material for the keyed anonymization methods
//!
//! Keys are held in a `secrecy::Secret`, so they are zeroed on drop, redacted
//! in `Debug` output and only reachable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use anonbench::config::secret_key;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_key("SecretKey#123");
//! assert_eq!(key.expose_secret().as_bytes(), b"SecretKey#123");
//! assert!(!format!("{key:?}").contains("SecretKey#123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Key used by the deterministic and bitwise methods when none is configured
pub const DEFAULT_KEY: &str = "SecretKey#123";

/// Positional key used by the bitwise method when none is configured
pub const DEFAULT_SECONDARY_KEY: &str = "SecretKet@987";

/// Raw key bytes
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial(Vec<u8>);

impl CloneableSecret for KeyMaterial {}
impl DebugSecret for KeyMaterial {}
impl SerializableSecret for KeyMaterial {}

impl KeyMaterial {
    /// Key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check if the key is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for KeyMaterial {
    fn from(s: &str) -> Self {
        KeyMaterial(s.as_bytes().to_vec())
    }
}

impl From<String> for KeyMaterial {
    fn from(s: String) -> Self {
        KeyMaterial(s.into_bytes())
    }
}

// Keys are configured as TOML strings, so they round-trip as strings.
impl Serialize for KeyMaterial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        String::from_utf8_lossy(&self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(KeyMaterial::from)
    }
}

/// Protected key
pub type SecretKey = Secret<KeyMaterial>;

/// Wraps a key string in a [`SecretKey`]
#[inline]
pub fn secret_key(value: impl Into<KeyMaterial>) -> SecretKey {
    Secret::new(value.into())
}

/// The built-in benchmark key
pub fn default_key() -> SecretKey {
    secret_key(DEFAULT_KEY)
}

/// The built-in bitwise positional key
pub fn default_secondary_key() -> SecretKey {
    secret_key(DEFAULT_SECONDARY_KEY)
}
