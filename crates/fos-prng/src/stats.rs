//! Stream usage counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one byte stream. Readable without taking the state lock.
#[derive(Debug, Default)]
pub struct RandomnessStats {
    /// Non-empty fill requests served
    fill_calls: AtomicU64,
    /// Total bytes handed out
    bytes_generated: AtomicU64,
    /// Times the state was (re)seeded
    seed_events: AtomicU64,
    /// Seeding attempts that failed
    entropy_failures: AtomicU64,
}

impl RandomnessStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_fill(&self, bytes: usize) {
        self.fill_calls.fetch_add(1, Ordering::Relaxed);
        self.bytes_generated.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_seed(&self) {
        self.seed_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_entropy_failure(&self) {
        self.entropy_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fill_calls(&self) -> u64 {
        self.fill_calls.load(Ordering::Relaxed)
    }

    pub fn bytes_generated(&self) -> u64 {
        self.bytes_generated.load(Ordering::Relaxed)
    }

    pub fn seed_events(&self) -> u64 {
        self.seed_events.load(Ordering::Relaxed)
    }

    pub fn entropy_failures(&self) -> u64 {
        self.entropy_failures.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            fill_calls: self.fill_calls(),
            bytes_generated: self.bytes_generated(),
            seed_events: self.seed_events(),
            entropy_failures: self.entropy_failures(),
        }
    }
}

/// Plain copy of [`RandomnessStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub fill_calls: u64,
    pub bytes_generated: u64,
    pub seed_events: u64,
    pub entropy_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_tracking() {
        let stats = RandomnessStats::new();

        stats.record_seed();
        stats.record_fill(16);
        stats.record_fill(4);
        stats.record_entropy_failure();

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                fill_calls: 2,
                bytes_generated: 20,
                seed_events: 1,
                entropy_failures: 1,
            }
        );
    }
}
