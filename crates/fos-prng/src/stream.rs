//! Shared, lock-guarded byte stream.
//!
//! One `ByteStream` is one sequence of pseudo-random bytes. Every thread
//! that fills from the same stream consumes the next bytes of that single
//! sequence; the lock is taken once per fill, not once per byte.

use crate::entropy::{EntropyError, EntropySource, OsEntropy};
use crate::state::{KEY_LEN, PrngState};
use crate::stats::RandomnessStats;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors from the byte stream
#[derive(Debug, Clone, Error)]
pub enum PrngError {
    #[error("Failed to seed random stream: {0}")]
    Entropy(#[from] EntropyError),
}

/// Lock-protected part of the stream.
pub(crate) struct Inner {
    pub(crate) state: PrngState,
    source: Box<dyn EntropySource>,
}

/// Process-shareable pseudo-random byte stream.
///
/// Seeds itself from its entropy source on the first non-empty fill.
/// Share it between threads by reference or `Arc`; use
/// [`ByteStream::global`] for the process-wide instance.
pub struct ByteStream {
    inner: Mutex<Inner>,
    stats: RandomnessStats,
    #[cfg(any(test, feature = "test-hooks"))]
    pub(crate) saved: Mutex<Option<PrngState>>,
}

static GLOBAL: Lazy<ByteStream> = Lazy::new(ByteStream::with_os_entropy);

impl ByteStream {
    /// Create an unseeded stream drawing its seed from `source`.
    pub fn new<S>(source: S) -> Self
    where
        S: EntropySource + 'static,
    {
        debug!(source = source.name(), "Creating random byte stream");

        Self {
            inner: Mutex::new(Inner {
                state: PrngState::new(),
                source: Box::new(source),
            }),
            stats: RandomnessStats::new(),
            #[cfg(any(test, feature = "test-hooks"))]
            saved: Mutex::new(None),
        }
    }

    /// Create an unseeded stream seeded from the OS CSPRNG.
    pub fn with_os_entropy() -> Self {
        Self::new(OsEntropy)
    }

    /// The process-wide stream, seeded from the OS on first use.
    pub fn global() -> &'static ByteStream {
        &GLOBAL
    }

    /// Fill `buf` with the next `buf.len()` bytes of the stream.
    ///
    /// An empty buffer is a no-op and never triggers seeding. If seeding
    /// fails the stream stays unseeded, `buf` is left untouched, and the
    /// next non-empty call retries.
    pub fn fill_random_bytes(&self, buf: &mut [u8]) -> Result<(), PrngError> {
        if buf.is_empty() {
            return Ok(());
        }

        let mut inner = self.lock();
        if !inner.state.is_initialized() {
            self.seed_locked(&mut inner)?;
        }
        inner.state.fill(buf);
        drop(inner);

        self.stats.record_fill(buf.len());
        trace!(bytes = buf.len(), "Filled random bytes");
        Ok(())
    }

    /// Whether the stream has been seeded in the current epoch.
    pub fn is_seeded(&self) -> bool {
        self.lock().state.is_initialized()
    }

    /// Usage counters for this stream.
    pub fn stats(&self) -> &RandomnessStats {
        &self.stats
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Inner> {
        // The state is a valid permutation at every point a panic can
        // unwind through, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn seed_locked(&self, inner: &mut Inner) -> Result<(), PrngError> {
        let mut key = [0u8; KEY_LEN];

        if let Err(e) = inner.source.fill_key(&mut key) {
            self.stats.record_entropy_failure();
            warn!(
                source = inner.source.name(),
                error = %e,
                "Entropy source failed, random stream left unseeded"
            );
            return Err(e.into());
        }

        inner.state.seed(&key);
        self.stats.record_seed();
        debug!(
            source = inner.source.name(),
            seed_events = self.stats.seed_events(),
            "Seeded random byte stream"
        );
        Ok(())
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Fill `buf` from the process-wide stream.
pub fn fill_random_bytes(buf: &mut [u8]) -> Result<(), PrngError> {
    ByteStream::global().fill_random_bytes(buf)
}
