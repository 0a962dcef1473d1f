//! Save/restore/reset hooks for pinning the byte sequence in tests.
//!
//! Only compiled for this crate's own tests or with the `test-hooks`
//! feature. Meant for single-threaded setup and teardown; calling these
//! while other threads are filling from the same stream makes the output
//! order meaningless, though it cannot corrupt the state.

use crate::state::PrngState;
use crate::stream::ByteStream;
use std::sync::PoisonError;
use tracing::debug;

/// Copy of the full generator state held by [`TestControl`].
pub type StateSnapshot = PrngState;

/// Test control plane for one [`ByteStream`].
#[derive(Debug, Clone, Copy)]
pub struct TestControl<'a> {
    stream: &'a ByteStream,
}

impl ByteStream {
    /// Hooks for saving, restoring and resetting this stream's state.
    pub fn test_control(&self) -> TestControl<'_> {
        TestControl { stream: self }
    }
}

impl TestControl<'_> {
    /// Copy the live state into the snapshot slot, replacing any earlier
    /// snapshot.
    pub fn save_state(&self) {
        let state = self.stream.lock().state.clone();
        *self
            .stream
            .saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(state);
        debug!("Saved random stream state");
    }

    /// Overwrite the live state with the most recent snapshot.
    ///
    /// Returns `false` and leaves the state alone if nothing was saved.
    pub fn restore_state(&self) -> bool {
        let saved = self
            .stream
            .saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match saved {
            Some(state) => {
                self.stream.lock().state = state;
                debug!("Restored random stream state");
                true
            }
            None => false,
        }
    }

    /// Mark the state unseeded so the next non-empty fill reseeds.
    pub fn reset_state(&self) {
        self.stream.lock().state.invalidate();
        debug!("Reset random stream state");
    }

    /// Read-only copy of the live state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.stream.lock().state.clone()
    }

    /// Whether the live state is seeded.
    pub fn is_initialized(&self) -> bool {
        self.stream.is_seeded()
    }
}
