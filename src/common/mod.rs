//! Common types shared across the crate.
//!
//! - Configuration constants and [`PoolConfig`]
//! - Error types

pub mod config;
pub mod error;

pub use config::PoolConfig;
pub use error::{Error, Result};
