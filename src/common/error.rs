//! Error types for the byte pool.

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Convenient Result type alias.
///
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by buffers and pools.
///
/// Pool exhaustion and oversized-buffer rejection are policy decisions,
/// not errors, so they have no variant here.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A source failed before reporting end-of-data.
    ///
    /// The bytes read before the failure remain in the buffer.
    #[error("read failed after {bytes_read} bytes: {source}")]
    PartialRead {
        /// Bytes appended by this call before the failure.
        bytes_read: usize,
        #[source]
        source: io::Error,
    },

    /// A sink failed before accepting the whole buffer.
    #[error("write failed after {bytes_written} bytes: {source}")]
    PartialWrite {
        /// Bytes the sink accepted before the failure.
        bytes_written: usize,
        #[source]
        source: io::Error,
    },

    /// Buffer contents are not valid UTF-8.
    #[error("buffer is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// A pool configuration value is out of range.
    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Bytes accumulated before a read failure, if this is one.
    pub fn bytes_read(&self) -> Option<usize> {
        match self {
            Error::PartialRead { bytes_read, .. } => Some(*bytes_read),
            _ => None,
        }
    }

    /// Bytes accepted by a sink before a write failure, if this is one.
    pub fn bytes_written(&self) -> Option<usize> {
        match self {
            Error::PartialWrite { bytes_written, .. } => Some(*bytes_written),
            _ => None,
        }
    }

    /// Check if this error came from a source or sink.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::PartialRead { .. } | Error::PartialWrite { .. }
        )
    }
}
