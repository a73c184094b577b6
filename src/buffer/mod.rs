//! Buffer pool management.
//!
//! # Components
//! - [`ByteBuffer`] - Growable byte sequence with streaming read/write
//! - [`BytePool`] - Concurrent, self-calibrating pool of buffers
//! - [`PooledBuffer`] - RAII guard that returns a buffer on drop
//! - [`PoolStats`] - Performance statistics
//! - [`size_class`] - Length to size-class mapping
//! - [`calibration`] - Default-size and ceiling computation

mod byte_buffer;
pub mod calibration;
mod global;
mod guard;
mod pool;
pub mod size_class;
mod stats;

pub use byte_buffer::ByteBuffer;
pub use calibration::Calibration;
pub use global::{default_pool, get, put};
pub use guard::PooledBuffer;
pub use pool::BytePool;
pub use stats::{PoolStats, StatsSnapshot};
