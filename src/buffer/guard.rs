//! RAII guard for pooled buffers.
//!
//! A [`PooledBuffer`] hands its buffer back to the owning pool when dropped,
//! so early returns and `?` never leak a buffer out of the recycling loop.

use std::ops::{Deref, DerefMut};

use super::pool::BytePool;
use super::ByteBuffer;

/// Guard for a buffer borrowed from a [`BytePool`].
///
/// # Example
/// ```
/// use leveled_bytepool::BytePool;
///
/// let pool = BytePool::new();
/// {
///     let mut buf = pool.get_pooled();
///     buf.write_text("temporary");
///     // guard drops here, buffer returns to the pool
/// }
/// assert_eq!(pool.idle_count(), 1);
/// ```
pub struct PooledBuffer<'a> {
    /// Pool the buffer goes back to.
    pool: &'a BytePool,
    /// `None` only after `into_inner`.
    buffer: Option<ByteBuffer>,
}

impl<'a> PooledBuffer<'a> {
    /// Called by `BytePool::get_pooled()`.
    pub(crate) fn new(pool: &'a BytePool, buffer: ByteBuffer) -> Self {
        Self {
            pool,
            buffer: Some(buffer),
        }
    }

    /// Detach the buffer; it will not be returned to the pool.
    pub fn into_inner(mut self) -> ByteBuffer {
        self.buffer.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = ByteBuffer;

    #[inline]
    fn deref(&self) -> &ByteBuffer {
        self.buffer.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledBuffer<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut ByteBuffer {
        self.buffer.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.put(buffer);
        }
    }
}
