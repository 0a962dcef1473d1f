//! Seed material for the byte stream.
//!
//! The stream asks its source for exactly one 256-byte key per seed epoch.

use crate::state::KEY_LEN;
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

/// Errors from an entropy source
#[derive(Debug, Clone, Error)]
pub enum EntropyError {
    #[error("Entropy source unavailable: {0}")]
    Unavailable(String),

    #[error("Short entropy read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },
}

/// Supplier of the one-time seed key.
pub trait EntropySource: Send {
    /// Fill `key` completely or fail.
    fn fill_key(&mut self, key: &mut [u8; KEY_LEN]) -> Result<(), EntropyError>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_key(&mut self, key: &mut [u8; KEY_LEN]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(key)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "os"
    }
}

/// Caller-supplied key, repeated cyclically up to 256 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedKey {
    key: [u8; KEY_LEN],
}

impl FixedKey {
    /// Expand `bytes` to a full key. Returns `None` for an empty or
    /// over-long key.
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > KEY_LEN {
            return None;
        }

        let mut key = [0u8; KEY_LEN];
        for (n, b) in key.iter_mut().enumerate() {
            *b = bytes[n % bytes.len()];
        }
        Some(Self { key })
    }

    /// Use a full 256-byte key as is.
    pub fn from_array(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// The identity key `[0, 1, ..., 255]`.
    pub fn identity() -> Self {
        let mut key = [0u8; KEY_LEN];
        for (n, b) in key.iter_mut().enumerate() {
            *b = n as u8;
        }
        Self { key }
    }

    /// The expanded key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl EntropySource for FixedKey {
    fn fill_key(&mut self, key: &mut [u8; KEY_LEN]) -> Result<(), EntropyError> {
        key.copy_from_slice(&self.key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

impl std::fmt::Debug for FixedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FixedKey([{} bytes])", KEY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_entropy_fills_key() {
        let mut key = [0u8; KEY_LEN];
        OsEntropy.fill_key(&mut key).unwrap();

        // 256 zero bytes from a working OS source is not a realistic outcome
        assert!(key.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_fixed_key_cycles() {
        let mut source = FixedKey::new(b"abc").unwrap();
        let mut key = [0u8; KEY_LEN];
        source.fill_key(&mut key).unwrap();

        assert_eq!(&key[..6], b"abcabc");
        assert_eq!(key[255], b'a'); // 255 % 3 == 0
    }

    #[test]
    fn test_fixed_key_bounds() {
        assert!(FixedKey::new(&[]).is_none());
        assert!(FixedKey::new(&[1u8; KEY_LEN]).is_some());
        assert!(FixedKey::new(&[1u8; KEY_LEN + 1]).is_none());
    }

    #[test]
    fn test_identity_key() {
        let key = FixedKey::identity();
        assert_eq!(key.as_bytes()[0], 0);
        assert_eq!(key.as_bytes()[200], 200);
        assert_eq!(key, FixedKey::from_array(*key.as_bytes()));
    }
}
