//! leveled-bytepool - A self-calibrating pool of reusable byte buffers.
//!
//! Programs that repeatedly grab a scratch buffer, fill it, use it and throw
//! it away (serializers, I/O readers) pay for an allocation every time. This
//! crate recycles those buffers and keeps adjusting how large new buffers
//! should be, and how large a returned buffer may be before it is dropped
//! instead of kept.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          BytePool                               │
//! │                                                                 │
//! │   get() ──▶ free-list pop ──(empty)──▶ mint(default_size)       │
//! │                                                                 │
//! │   put(buf) ──▶ calls[index(len)] += 1                           │
//! │                   │                                             │
//! │                   ├─(> threshold)──▶ calibrate()                │
//! │                   │                    default_size = top class │
//! │                   │                    max_size = p95 ceiling   │
//! │                   ▼                                             │
//! │              capacity <= max_size ? reset + push : drop         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Configuration constants, [`PoolConfig`], error types
//! - [`buffer`] - [`ByteBuffer`], [`BytePool`], guards and statistics
//!
//! # Quick Start
//! ```
//! use leveled_bytepool::BytePool;
//! use std::io::Cursor;
//!
//! let pool = BytePool::new();
//!
//! let mut buf = pool.get();
//! buf.read_from(&mut Cursor::new(b"payload".to_vec())).unwrap();
//! assert_eq!(buf.bytes(), b"payload");
//!
//! pool.put(buf);
//! ```

pub mod buffer;
pub mod common;

pub use common::config::{MAX_SIZE, MIN_SIZE, STEPS};
pub use common::{Error, PoolConfig, Result};

pub use buffer::{
    default_pool, get, put, ByteBuffer, BytePool, Calibration, PoolStats, PooledBuffer,
    StatsSnapshot,
};
