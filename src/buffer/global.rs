//! Process-wide default pool.

use std::sync::OnceLock;

use super::{ByteBuffer, BytePool};

static DEFAULT_POOL: OnceLock<BytePool> = OnceLock::new();

/// Get the process-wide pool, creating it on first use.
///
/// Independent pools can still be created with [`BytePool::new`].
pub fn default_pool() -> &'static BytePool {
    DEFAULT_POOL.get_or_init(BytePool::new)
}

/// Take a buffer from the default pool.
#[inline]
pub fn get() -> ByteBuffer {
    default_pool().get()
}

/// Return a buffer to the default pool.
#[inline]
pub fn put(buffer: ByteBuffer) {
    default_pool().put(buffer)
}
