//! Calibration of pool-wide sizing from the size-class histogram.
//!
//! Given the number of buffers returned per size class since the last pass,
//! [`compute`] picks:
//! - `default_size`: the most frequently returned class
//! - `max_size`: the largest class among those covering `max_percentile`
//!   of all returns, walked in descending frequency order

use crate::buffer::size_class::class_size;
use crate::common::config::STEPS;

/// Outcome of one calibration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Capacity for freshly minted buffers.
    pub default_size: usize,
    /// Retention ceiling for returned buffers.
    pub max_size: usize,
    /// Total observations the pass was computed from.
    pub total_calls: u64,
}

#[derive(Debug, Clone, Copy)]
struct CallSize {
    calls: u64,
    size: usize,
}

/// Compute new pool sizing from per-class call counts.
///
/// Returns `None` when no calls were observed.
pub fn compute(calls: &[u64; STEPS], max_percentile: f64) -> Option<Calibration> {
    let total_calls: u64 = calls.iter().sum();
    if total_calls == 0 {
        return None;
    }

    let mut sizes: Vec<CallSize> = calls
        .iter()
        .enumerate()
        .map(|(i, &calls)| CallSize {
            calls,
            size: class_size(i),
        })
        .collect();

    // Most requested first; stable, so ties keep the smaller class first.
    sizes.sort_by(|a, b| b.calls.cmp(&a.calls));

    let default_size = sizes[0].size;
    let mut max_size = default_size;

    let max_sum = (total_calls as f64 * max_percentile) as u64;
    let mut sum = 0u64;
    for entry in &sizes {
        // Sorted descending, so only unobserved classes follow a zero.
        if sum > max_sum || entry.calls == 0 {
            break;
        }
        sum += entry.calls;
        max_size = max_size.max(entry.size);
    }

    Some(Calibration {
        default_size,
        max_size,
        total_calls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::{MAX_PERCENTILE, MIN_SIZE};

    fn histogram(entries: &[(usize, u64)]) -> [u64; STEPS] {
        let mut calls = [0u64; STEPS];
        for &(idx, count) in entries {
            calls[idx] = count;
        }
        calls
    }

    #[test]
    fn test_empty_histogram() {
        assert_eq!(compute(&[0; STEPS], MAX_PERCENTILE), None);
    }

    #[test]
    fn test_single_dominant_class() {
        let calls = histogram(&[(4, 9_700), (0, 200), (12, 100)]);
        let cal = compute(&calls, MAX_PERCENTILE).unwrap();

        assert_eq!(cal.default_size, 1024);
        assert_eq!(cal.max_size, 1024);
        assert_eq!(cal.total_calls, 10_000);
    }

    #[test]
    fn test_ceiling_covers_percentile() {
        // 60% small, 36% medium, 4% outliers.
        let calls = histogram(&[(0, 600), (3, 360), (10, 40)]);
        let cal = compute(&calls, MAX_PERCENTILE).unwrap();

        assert_eq!(cal.default_size, MIN_SIZE);
        assert_eq!(cal.max_size, 512);
    }

    #[test]
    fn test_default_can_exceed_smaller_classes() {
        let calls = histogram(&[(8, 700), (2, 300)]);
        let cal = compute(&calls, MAX_PERCENTILE).unwrap();

        assert_eq!(cal.default_size, 64 << 8);
        // The smaller class never lowers the ceiling.
        assert_eq!(cal.max_size, 64 << 8);
    }

    #[test]
    fn test_full_percentile_includes_outliers() {
        let calls = histogram(&[(0, 999), (19, 1)]);
        let cal = compute(&calls, 1.0).unwrap();

        assert_eq!(cal.default_size, MIN_SIZE);
        assert_eq!(cal.max_size, 64 << 19);
    }

    #[test]
    fn test_full_percentile_ignores_unobserved_classes() {
        let calls = histogram(&[(4, 1000)]);
        let cal = compute(&calls, 1.0).unwrap();

        assert_eq!(cal.default_size, 1024);
        assert_eq!(cal.max_size, 1024);
    }

    #[test]
    fn test_full_percentile_stops_at_last_observed_class() {
        let calls = histogram(&[(0, 700), (6, 300)]);
        let cal = compute(&calls, 1.0).unwrap();

        assert_eq!(cal.max_size, 64 << 6);
    }

    #[test]
    fn test_ties_prefer_smaller_class() {
        let calls = histogram(&[(5, 50), (2, 50)]);
        let cal = compute(&calls, 0.5).unwrap();

        assert_eq!(cal.default_size, 64 << 2);
    }
}
