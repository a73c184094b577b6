//! Integration tests for the byte pool.
//!
//! These tests verify cross-component behavior that unit tests don't cover.

use leveled_bytepool::buffer::size_class;
use leveled_bytepool::{ByteBuffer, BytePool, PoolConfig, STEPS};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

fn filled(len: usize) -> ByteBuffer {
    let mut buf = ByteBuffer::with_capacity(len);
    buf.write_bytes(&vec![0x5A; len]);
    buf
}

/// No data from a prior use leaks into the next borrower.
#[test]
fn test_no_data_leaks_between_borrowers() {
    let pool = BytePool::with_config(PoolConfig::default().initial_default_size(64)).unwrap();

    for round in 0..50usize {
        let mut buf = pool.get();
        assert!(buf.is_empty(), "round {}", round);
        assert!(buf.capacity() >= 64);
        buf.write_bytes(&vec![round as u8; round * 10]);
        pool.put(buf);
    }

    let snapshot = pool.stats().snapshot();
    assert_eq!(snapshot.misses, 1);
    assert_eq!(snapshot.hits, 49);
}

/// Concurrent puts never lose a counter increment.
#[test]
fn test_concurrent_put_counters() {
    let config = PoolConfig::default().calibrate_threshold(u64::MAX).max_idle(64);
    let pool = Arc::new(BytePool::with_config(config).unwrap());

    const THREADS: usize = 8;
    const PUTS: usize = 2_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for i in 0..PUTS {
                    let mut buf = pool.get();
                    buf.write_bytes(&vec![t as u8; (i * 37 + t) % 5000]);
                    pool.put(buf);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total: u64 = pool.calls().iter().sum();
    assert_eq!(total, (THREADS * PUTS) as u64);
    assert_eq!(pool.stats().snapshot().puts, (THREADS * PUTS) as u64);
}

/// Calibration under concurrent load settles on the dominant size class.
#[test]
fn test_concurrent_calibration_converges() {
    let config = PoolConfig::default().calibrate_threshold(500);
    let pool = Arc::new(BytePool::with_config(config).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for i in 0..2_000 {
                    // 99% of traffic is ~4KB, 1% is ~1MB.
                    let len = if i % 100 == 0 { 1 << 20 } else { 4000 };
                    pool.put(filled(len));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert!(pool.stats().snapshot().calibrations >= 1);
    assert_eq!(pool.default_size(), 4096);
    assert_eq!(pool.max_size(), 4096);
}

/// Oversized buffers stop being retained once a ceiling is learned.
#[test]
fn test_outlier_not_retained_after_calibration() {
    let pool = BytePool::with_config(PoolConfig::default().calibrate_threshold(100)).unwrap();

    for _ in 0..101 {
        pool.put(filled(200));
    }
    assert_eq!(pool.max_size(), 256);

    let idle = pool.idle_count();
    pool.put(filled(1 << 20));
    assert_eq!(pool.idle_count(), idle);
    assert_eq!(pool.stats().snapshot().rejected, 1);
}

/// Independent pools keep independent state.
#[test]
fn test_pools_are_independent() {
    let a = BytePool::with_config(PoolConfig::default().calibrate_threshold(3)).unwrap();
    let b = BytePool::new();

    for _ in 0..4 {
        a.put(filled(100));
    }
    b.put(filled(100));

    assert_eq!(a.default_size(), 128);
    assert_eq!(b.default_size(), 0);
    assert_eq!(b.calls()[1], 1);
    assert_eq!(a.calls(), [0; STEPS]);
}

/// The default pool serves buffers like any other.
#[test]
fn test_default_pool() {
    let mut buf = leveled_bytepool::get();
    assert!(buf.is_empty());
    buf.write_text("shared");
    leveled_bytepool::put(buf);
    assert!(leveled_bytepool::default_pool().stats().snapshot().puts >= 1);
}

proptest! {
    #[test]
    fn prop_index_monotonic_and_bounded(a in any::<usize>(), b in any::<usize>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(size_class::index(lo) <= size_class::index(hi));
        prop_assert!(size_class::index(hi) < STEPS);
    }

    #[test]
    fn prop_index_covers_length(n in 1usize..(64 << 19)) {
        let idx = size_class::index(n);
        prop_assert!(size_class::class_size(idx) >= n);
        if idx > 0 {
            prop_assert!(size_class::class_size(idx - 1) < n);
        }
    }
}
