//! Size-class indexing.
//!
//! Buffer lengths map onto [`STEPS`] geometrically spaced classes anchored
//! at [`MIN_SIZE`]:
//!
//! ```text
//! length:  1..=64  65..=128  129..=256  ...  > 16MB
//! index:     0        1          2      ...    19
//! size:     64       128        256     ...   32MB
//! ```

use crate::common::config::{MIN_BIT_SIZE, MIN_SIZE, STEPS};

/// Class index for a buffer of `n` bytes.
///
/// Equals `ceil(log2(ceil(n / 64)))`, clamped to the last class.
/// Lengths 0 and 1 both land in class 0.
#[inline]
pub fn index(n: usize) -> usize {
    let units = n.saturating_sub(1) >> MIN_BIT_SIZE;
    // Number of halvings needed to reach zero.
    let idx = (usize::BITS - units.leading_zeros()) as usize;
    idx.min(STEPS - 1)
}

/// Capacity represented by class `index`.
///
/// # Panics
/// Panics if `index >= STEPS`.
#[inline]
pub fn class_size(index: usize) -> usize {
    assert!(index < STEPS, "size class out of range: {} >= {}", index, STEPS);
    MIN_SIZE << index
}
