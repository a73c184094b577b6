//! Byte pool statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a byte pool.
///
/// All fields are atomic for lock-free, thread-safe updates.
///
/// # Memory Ordering
/// `Ordering::Relaxed` everywhere: counters are independent and only need
/// atomicity, not ordering with respect to each other.
///
/// # Example
/// ```
/// use leveled_bytepool::PoolStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = PoolStats::new();
/// stats.hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct PoolStats {
    /// Number of `get` calls.
    pub gets: AtomicU64,

    /// Number of `get` calls served from the free-list.
    pub hits: AtomicU64,

    /// Number of `get` calls that minted a new buffer.
    pub misses: AtomicU64,

    /// Number of `put` calls.
    pub puts: AtomicU64,

    /// Buffers dropped because their capacity exceeded the ceiling.
    pub rejected: AtomicU64,

    /// Buffers dropped because the free-list was full.
    pub discarded: AtomicU64,

    /// Completed calibration passes.
    pub calibrations: AtomicU64,
}

impl PoolStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            gets: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            puts: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            calibrations: AtomicU64::new(0),
        }
    }

    /// Fraction of `get` calls served from the free-list (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            calibrations: self.calibrations.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.gets.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.puts.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
        self.calibrations.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of pool statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub gets: u64,
    pub hits: u64,
    pub misses: u64,
    pub puts: u64,
    pub rejected: u64,
    pub discarded: u64,
    pub calibrations: u64,
}

impl StatsSnapshot {
    /// Fraction of `get` calls served from the free-list (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Buffers returned but not retained.
    pub fn dropped(&self) -> u64 {
        self.rejected + self.discarded
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ gets: {}, puts: {}, hits: {}, misses: {}, dropped: {}, calibrations: {}, hit_rate: {:.2}% }}",
            self.gets,
            self.puts,
            self.hits,
            self.misses,
            self.dropped(),
            self.calibrations,
            self.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = PoolStats::new();
        assert_eq!(stats.gets.load(Ordering::Relaxed), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = PoolStats::new();
        stats.hits.fetch_add(3, Ordering::Relaxed);
        stats.misses.fetch_add(1, Ordering::Relaxed);
        stats.rejected.fetch_add(2, Ordering::Relaxed);
        stats.discarded.fetch_add(1, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hits, 3);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.dropped(), 3);
        assert_eq!(snapshot.hit_rate(), 0.75);
    }

    #[test]
    fn test_stats_reset() {
        let stats = PoolStats::new();
        stats.puts.fetch_add(100, Ordering::Relaxed);
        stats.calibrations.fetch_add(2, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = PoolStats::new();
        stats.gets.fetch_add(100, Ordering::Relaxed);
        stats.hits.fetch_add(80, Ordering::Relaxed);
        stats.misses.fetch_add(20, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("gets: 100"));
        assert!(display.contains("hits: 80"));
        assert!(display.contains("80.00%"));
    }
}
