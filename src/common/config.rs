//! Configuration for the leveled byte pool.
//!
//! Compile-time constants describe the fixed size-class layout. [`PoolConfig`]
//! holds the runtime knobs a caller may tune per pool instance.

use crate::common::{Error, Result};

/// log2 of the smallest size class (64 bytes, a typical CPU cache line).
pub const MIN_BIT_SIZE: u32 = 6;

/// Number of size classes tracked by a pool.
pub const STEPS: usize = 20;

/// Smallest size class in bytes.
pub const MIN_SIZE: usize = 1 << MIN_BIT_SIZE;

/// Largest size class in bytes (32MB).
///
/// # Memory Layout
/// Classes double from [`MIN_SIZE`]:
/// - class 0: 64B
/// - class 10: 64KB
/// - class 19: 32MB
pub const MAX_SIZE: usize = 1 << (MIN_BIT_SIZE as usize + STEPS - 1);

/// Observations of a single class that trigger a calibration pass.
pub const CALIBRATE_CALLS_THRESHOLD: u64 = 42_000;

/// Share of recent traffic the retention ceiling has to cover.
pub const MAX_PERCENTILE: f64 = 0.95;

/// Region allocated by `read_from` when the buffer has no capacity at all.
pub const READ_FROM_INITIAL_SIZE: usize = 64;

/// Default bound on idle buffers held by one pool.
pub const DEFAULT_MAX_IDLE: usize = 4096;

/// Runtime knobs for a [`BytePool`](crate::BytePool).
///
/// # Example
/// ```
/// use leveled_bytepool::{BytePool, PoolConfig};
///
/// let config = PoolConfig::default()
///     .calibrate_threshold(1_000)
///     .initial_default_size(4096)
///     .max_idle(256);
///
/// let pool = BytePool::with_config(config).unwrap();
/// assert_eq!(pool.default_size(), 4096);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Per-class observation count that triggers calibration.
    pub calibrate_threshold: u64,

    /// Traffic share the retention ceiling must accommodate, in (0, 1].
    pub max_percentile: f64,

    /// Capacity of freshly minted buffers before the first calibration.
    pub initial_default_size: usize,

    /// Retention ceiling before the first calibration (0 = no ceiling).
    pub initial_max_size: usize,

    /// Maximum number of idle buffers kept in the free-list.
    pub max_idle: usize,
}

impl PoolConfig {
    /// Set the calibration threshold.
    pub fn calibrate_threshold(mut self, threshold: u64) -> Self {
        self.calibrate_threshold = threshold;
        self
    }

    /// Set the traffic percentile covered by the retention ceiling.
    pub fn max_percentile(mut self, percentile: f64) -> Self {
        self.max_percentile = percentile;
        self
    }

    /// Set the default buffer capacity used until the first calibration.
    pub fn initial_default_size(mut self, size: usize) -> Self {
        self.initial_default_size = size;
        self
    }

    /// Set the retention ceiling used until the first calibration.
    pub fn initial_max_size(mut self, size: usize) -> Self {
        self.initial_max_size = size;
        self
    }

    /// Set the free-list bound.
    pub fn max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Check that every knob is usable.
    ///
    /// # Errors
    /// `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.calibrate_threshold == 0 {
            return Err(Error::InvalidConfig(
                "calibrate_threshold must be > 0".to_string(),
            ));
        }
        // NaN fails both comparisons, so it is rejected too.
        if !(self.max_percentile > 0.0 && self.max_percentile <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "max_percentile must be in (0, 1], got {}",
                self.max_percentile
            )));
        }
        if self.max_idle == 0 {
            return Err(Error::InvalidConfig("max_idle must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            calibrate_threshold: CALIBRATE_CALLS_THRESHOLD,
            max_percentile: MAX_PERCENTILE,
            initial_default_size: 0,
            initial_max_size: 0,
            max_idle: DEFAULT_MAX_IDLE,
        }
    }
}
