//! BytePool - the self-calibrating buffer pool.
//!
//! The [`BytePool`] provides:
//! - Lock-free recycling of [`ByteBuffer`]s through a bounded free-list
//! - Per-size-class tracking of returned buffer lengths
//! - Periodic recalibration of the default allocation size and the
//!   retention ceiling from that histogram

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam::queue::ArrayQueue;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::buffer::calibration::{self, Calibration};
use crate::buffer::size_class;
use crate::buffer::{ByteBuffer, PoolStats, PooledBuffer};
use crate::common::config::STEPS;
use crate::common::{PoolConfig, Result};

/// A concurrent pool of reusable byte buffers.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                         BytePool                            │
/// │  ┌──────────────────────┐   ┌───────────────────────────┐   │
/// │  │ calls: [AtomicU64;20]│──▶│ calibration (try-lock)    │   │
/// │  │  64B 128B ... 32MB   │   │ default_size / max_size   │   │
/// │  └──────────────────────┘   └───────────────────────────┘   │
/// │  ┌─────────────────────────────────────────────────────┐    │
/// │  │      free_list: ArrayQueue<ByteBuffer> (lock-free)  │    │
/// │  └─────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// - `calls`, `default_size`, `max_size`: atomics, no lock
/// - `free_list`: lock-free bounded queue
/// - `calibrating`: `Mutex<()>`, only ever `try_lock`ed, so a contending
///   `put` skips calibration instead of waiting
/// - `last_calibration`: separate `Mutex`, so readers never hold the guard
/// - `stats`: all atomic counters
///
/// A [`ByteBuffer`] itself is not shared: between `get` and `put` exactly
/// one owner holds it.
///
/// # Example
/// ```
/// use leveled_bytepool::BytePool;
///
/// let pool = BytePool::new();
///
/// let mut buf = pool.get();
/// buf.write_text("scratch");
/// pool.put(buf);
///
/// // The recycled buffer comes back empty.
/// let buf = pool.get();
/// assert!(buf.is_empty());
/// ```
#[derive(Debug)]
pub struct BytePool {
    /// Buffers returned per size class since the last calibration.
    calls: [AtomicU64; STEPS],

    /// Capacity given to freshly minted buffers.
    default_size: AtomicUsize,

    /// Retention ceiling; 0 means no ceiling yet.
    max_size: AtomicUsize,

    /// Idle buffers, not partitioned by size.
    free_list: ArrayQueue<ByteBuffer>,

    /// Calibration guard.
    calibrating: Mutex<()>,

    /// Result of the most recent calibration pass.
    last_calibration: Mutex<Option<Calibration>>,

    /// Performance statistics.
    stats: PoolStats,

    config: PoolConfig,
}

impl BytePool {
    /// Create a pool with the default configuration.
    pub fn new() -> Self {
        Self::build(PoolConfig::default())
    }

    /// Create a pool with a custom configuration.
    ///
    /// # Errors
    /// `Error::InvalidConfig` if `config` fails validation.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PoolConfig) -> Self {
        Self {
            calls: std::array::from_fn(|_| AtomicU64::new(0)),
            default_size: AtomicUsize::new(config.initial_default_size),
            max_size: AtomicUsize::new(config.initial_max_size),
            free_list: ArrayQueue::new(config.max_idle),
            calibrating: Mutex::new(()),
            last_calibration: Mutex::new(None),
            stats: PoolStats::new(),
            config,
        }
    }

    // ========================================================================
    // Public API: Get and put
    // ========================================================================

    /// Take an idle buffer, or mint one of `default_size()` capacity.
    ///
    /// Never fails. The returned buffer is always empty.
    pub fn get(&self) -> ByteBuffer {
        self.stats.gets.fetch_add(1, Ordering::Relaxed);

        match self.free_list.pop() {
            Some(buffer) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                buffer
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                ByteBuffer::with_capacity(self.default_size.load(Ordering::Relaxed))
            }
        }
    }

    /// Like [`get`](Self::get), wrapped in a guard that puts the buffer back on drop.
    pub fn get_pooled(&self) -> PooledBuffer<'_> {
        PooledBuffer::new(self, self.get())
    }

    /// Return a buffer to the pool.
    ///
    /// Records the buffer's length in its size class, calibrating when that
    /// class crosses the threshold. The buffer is then reset and kept if its
    /// capacity is within the ceiling, otherwise dropped.
    pub fn put(&self, mut buffer: ByteBuffer) {
        self.stats.puts.fetch_add(1, Ordering::Relaxed);

        let idx = size_class::index(buffer.len());
        if self.calls[idx].fetch_add(1, Ordering::Relaxed) + 1 > self.config.calibrate_threshold {
            self.calibrate();
        }

        let max_size = self.max_size.load(Ordering::Relaxed);
        let capacity = buffer.capacity();
        if max_size != 0 && capacity > max_size {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            trace!(capacity, max_size, "rejecting oversized buffer");
            return;
        }

        buffer.reset();
        if self.free_list.push(buffer).is_err() {
            self.stats.discarded.fetch_add(1, Ordering::Relaxed);
            trace!(capacity, "free-list full, discarding buffer");
        }
    }

    // ========================================================================
    // Public API: Calibration
    // ========================================================================

    /// Recompute `default_size` and `max_size` from the histogram.
    ///
    /// Runs automatically from [`put`](Self::put). Returns `None` without
    /// waiting if another thread is calibrating, or if nothing was observed
    /// since the last pass.
    pub fn calibrate(&self) -> Option<Calibration> {
        let Some(_guard) = self.calibrating.try_lock() else {
            trace!("calibration already running, skipping");
            return None;
        };

        let mut calls = [0u64; STEPS];
        for (observed, counter) in calls.iter_mut().zip(&self.calls) {
            *observed = counter.swap(0, Ordering::Relaxed);
        }

        let result = calibration::compute(&calls, self.config.max_percentile)?;

        self.default_size.store(result.default_size, Ordering::Relaxed);
        self.max_size.store(result.max_size, Ordering::Relaxed);
        *self.last_calibration.lock() = Some(result);
        self.stats.calibrations.fetch_add(1, Ordering::Relaxed);

        debug!(
            default_size = result.default_size,
            max_size = result.max_size,
            total_calls = result.total_calls,
            "byte pool calibrated"
        );

        Some(result)
    }

    /// Result of the most recent calibration pass.
    pub fn last_calibration(&self) -> Option<Calibration> {
        *self.last_calibration.lock()
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Capacity currently given to freshly minted buffers.
    pub fn default_size(&self) -> usize {
        self.default_size.load(Ordering::Relaxed)
    }

    /// Current retention ceiling (0 = none).
    pub fn max_size(&self) -> usize {
        self.max_size.load(Ordering::Relaxed)
    }

    /// Snapshot of the per-class counters since the last calibration.
    pub fn calls(&self) -> [u64; STEPS] {
        std::array::from_fn(|i| self.calls[i].load(Ordering::Relaxed))
    }

    /// Number of idle buffers in the free-list.
    pub fn idle_count(&self) -> usize {
        self.free_list.len()
    }

    /// Get pool statistics.
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Get the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl Default for BytePool {
    fn default() -> Self {
        Self::new()
    }
}
