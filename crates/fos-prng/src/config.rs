//! Byte stream configuration
//!
//! Chooses where a stream gets its seed. Loaded from JSON, e.g.
//!
//! ```json
//! { "entropy": { "kind": "fixed_key", "key": [1, 2, 3] } }
//! ```

use crate::entropy::FixedKey;
use crate::state::KEY_LEN;
use crate::stream::ByteStream;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Seed source selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntropyConfig {
    /// Operating-system CSPRNG
    #[default]
    Os,

    /// Fixed key of 1..=256 bytes, repeated to fill 256 bytes.
    /// Every seed epoch replays the same sequence.
    FixedKey { key: Vec<u8> },
}

/// Complete stream configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrngConfig {
    /// Where the seed comes from
    pub entropy: EntropyConfig,
}

impl PrngConfig {
    /// OS-seeded stream
    pub fn os() -> Self {
        Self {
            entropy: EntropyConfig::Os,
        }
    }

    /// Reproducible stream seeded from `key`
    pub fn fixed_key(key: impl Into<Vec<u8>>) -> Self {
        Self {
            entropy: EntropyConfig::FixedKey { key: key.into() },
        }
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let EntropyConfig::FixedKey { key } = &self.entropy {
            if key.is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if key.len() > KEY_LEN {
                return Err(ConfigError::KeyTooLong(key.len()));
            }
        }
        Ok(())
    }

    /// Build an unseeded stream from this configuration
    pub fn build(&self) -> Result<ByteStream, ConfigError> {
        self.validate()?;

        let stream = match &self.entropy {
            EntropyConfig::Os => ByteStream::with_os_entropy(),
            EntropyConfig::FixedKey { key } => {
                info!(key_len = key.len(), "Using fixed-key random stream");
                let source = FixedKey::new(key).ok_or(ConfigError::EmptyKey)?;
                ByteStream::new(source)
            }
        };
        Ok(stream)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Fixed key must not be empty")]
    EmptyKey,

    #[error("Fixed key too long: {0} bytes (maximum 256)")]
    KeyTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_os() {
        let config = PrngConfig::default();
        assert_eq!(config.entropy, EntropyConfig::Os);
        assert_eq!(EntropyConfig::default(), EntropyConfig::Os);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_fixed_key() {
        let config =
            PrngConfig::from_json(r#"{ "entropy": { "kind": "fixed_key", "key": [1, 2, 3] } }"#)
                .unwrap();
        assert_eq!(config, PrngConfig::fixed_key(vec![1, 2, 3]));
    }

    #[test]
    fn test_parse_empty_object() {
        let config = PrngConfig::from_json("{}").unwrap();
        assert_eq!(config, PrngConfig::os());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PrngConfig::from_json(r#"{ "entropy": { "kind": "dice" } }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PrngConfig::from_json(r#"{ "entropy": { "kind": "fixed_key", "key": [] } }"#),
            Err(ConfigError::EmptyKey)
        ));
        assert!(matches!(
            PrngConfig::fixed_key(vec![0u8; 257]).validate(),
            Err(ConfigError::KeyTooLong(257))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PrngConfig::fixed_key(b"fos".to_vec());
        let json = config.to_json().unwrap();
        assert_eq!(PrngConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_built_streams_are_reproducible() {
        let config = PrngConfig::fixed_key((0..=255u8).collect::<Vec<_>>());
        let a = config.build().unwrap();
        let b = config.build().unwrap();

        let mut out_a = [0u8; 4];
        let mut out_b = [0u8; 4];
        a.fill_random_bytes(&mut out_a).unwrap();
        b.fill_random_bytes(&mut out_b).unwrap();

        assert_eq!(out_a, [0x19, 0x6b, 0x28, 0x67]);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PrngConfig::load("/nonexistent/fos-prng.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
