//! fOS Shared Randomness
//!
//! Process-wide pseudo-random byte stream for the embedded database layer:
//! temp file names, row-id fallbacks and other filler randomness.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  first non-empty fill  ┌───────────────────┐
//! │  ByteStream  │───────────────────────▶│  EntropySource    │
//! │  (Mutex)     │◀───── 256-byte key ────│  (OS / fixed key) │
//! └──────┬───────┘                        └───────────────────┘
//!        │ one lock per fill
//!        ▼
//! ┌──────────────┐
//! │  PrngState   │  i, j, 256-entry permutation (RC4 keystream step)
//! └──────────────┘
//! ```
//!
//! # Not for secrets
//!
//! The output is RC4 keystream. It is fine for names and tie-breaking and
//! must never be used for keys, nonces or tokens.
//!
//! # Test hooks
//!
//! With the `test-hooks` feature, [`ByteStream::test_control`] exposes
//! save/restore/reset of the generator state so tests can pin the exact
//! byte sequence.

mod config;
mod entropy;
mod names;
mod rng;
mod state;
mod stats;
mod stream;
#[cfg(any(test, feature = "test-hooks"))]
mod testing;

pub use config::{ConfigError, EntropyConfig, PrngConfig};
pub use entropy::{EntropyError, EntropySource, FixedKey, OsEntropy};
pub use names::{DEFAULT_TEMP_PREFIX, TEMP_NAME_RANDOM_LEN, random_rowid, temp_file_name};
pub use rng::StreamRng;
pub use state::{KEY_LEN, PrngState};
pub use stats::{RandomnessStats, StatsSnapshot};
pub use stream::{ByteStream, PrngError, fill_random_bytes};
#[cfg(any(test, feature = "test-hooks"))]
pub use testing::{StateSnapshot, TestControl};
