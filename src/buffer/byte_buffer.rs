//! ByteBuffer - a growable, reusable byte sequence.
//!
//! A [`ByteBuffer`] owns a `Vec<u8>` and adds the operations a pooled
//! scratch buffer needs:
//! - Streaming fill from any `io::Read` with doubling growth
//! - Streaming drain into any `io::Write`
//! - `reset()` that keeps the allocation for the next borrower

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read, Write};

use crate::common::config::READ_FROM_INITIAL_SIZE;
use crate::common::{Error, Result};

/// An owned, resizable byte sequence.
///
/// Logical length (`len`) is always `<= capacity`. Capacity only grows,
/// except when the buffer is dropped.
///
/// # Example
/// ```
/// use leveled_bytepool::ByteBuffer;
///
/// let mut buf = ByteBuffer::with_capacity(16);
/// buf.write_text("hello");
/// buf.write_byte(b' ');
/// buf.write_bytes(b"world");
///
/// assert_eq!(buf.bytes(), b"hello world");
/// assert_eq!(buf.as_text().unwrap(), "hello world");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    buf: Vec<u8>,
}

impl ByteBuffer {
    /// Create an empty buffer with room for `size_hint` bytes.
    pub fn with_capacity(size_hint: usize) -> Self {
        Self {
            buf: Vec::with_capacity(size_hint),
        }
    }

    /// Create an empty buffer without allocating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if no bytes are in use.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    // ========================================================================
    // Streaming
    // ========================================================================

    /// Append everything `reader` yields until end-of-data.
    ///
    /// Returns the number of bytes appended by this call. End-of-data is a
    /// normal outcome. An empty, unallocated buffer starts with a 64-byte
    /// region; whenever the region fills up its size doubles, keeping the
    /// total copy cost linear in the bytes read.
    ///
    /// Spare capacity is handed to the reader in a doubling window rather
    /// than all at once, so a large recycled buffer costs no more to fill
    /// than the bytes that actually arrive.
    ///
    /// # Errors
    /// `Error::PartialRead` if the reader fails. The bytes read before the
    /// failure stay in the buffer and their count is carried by the error.
    /// `ErrorKind::Interrupted` is retried.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        let start = self.buf.len();
        let mut filled = start;
        let mut window = READ_FROM_INITIAL_SIZE;

        if self.buf.capacity() == 0 {
            self.buf.reserve_exact(READ_FROM_INITIAL_SIZE);
        }

        loop {
            if filled == self.buf.len() {
                if filled == self.buf.capacity() {
                    let capacity = self.buf.capacity();
                    self.buf.reserve_exact(capacity);
                }
                // Only the exposed window is zeroed.
                let end = filled.saturating_add(window).min(self.buf.capacity());
                self.buf.resize(end, 0);
                window = window.saturating_mul(2);
            }

            match reader.read(&mut self.buf[filled..]) {
                Ok(0) => {
                    self.buf.truncate(filled);
                    return Ok(filled - start);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(filled);
                    return Err(Error::PartialRead {
                        bytes_read: filled - start,
                        source: e,
                    });
                }
            }
        }
    }

    /// Write the full content to `writer`.
    ///
    /// Returns the number of bytes written, which is always `len()` on success.
    ///
    /// # Errors
    /// `Error::PartialWrite` carrying the writer's error unchanged together
    /// with the bytes it accepted before failing. A writer that accepts zero
    /// bytes fails with `ErrorKind::WriteZero`. `ErrorKind::Interrupted` is
    /// retried.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize> {
        let mut written = 0;
        while written < self.buf.len() {
            match writer.write(&self.buf[written..]) {
                Ok(0) => {
                    return Err(Error::PartialWrite {
                        bytes_written: written,
                        source: io::Error::from(io::ErrorKind::WriteZero),
                    });
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(Error::PartialWrite {
                        bytes_written: written,
                        source: e,
                    });
                }
            }
        }
        Ok(written)
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Drop the content but keep the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Read-only view of the content.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Mutable view of the content. Writes through it change the buffer.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Content as text, without copying.
    ///
    /// # Errors
    /// `Error::InvalidUtf8` if the content is not UTF-8.
    pub fn as_text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.buf)?)
    }

    /// Content as text, replacing invalid sequences.
    ///
    /// Borrows when the content is valid UTF-8.
    pub fn as_text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    /// Consume the buffer and return its storage.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    // ========================================================================
    // Appends
    // ========================================================================

    /// Append `p`. Returns `p.len()`.
    #[inline]
    pub fn write_bytes(&mut self, p: &[u8]) -> usize {
        self.buf.extend_from_slice(p);
        p.len()
    }

    /// Append a single byte.
    #[inline]
    pub fn write_byte(&mut self, c: u8) {
        self.buf.push(c);
    }

    /// Append the UTF-8 bytes of `s`. Returns `s.len()`.
    #[inline]
    pub fn write_text(&mut self, s: &str) -> usize {
        self.write_bytes(s.as_bytes())
    }

    /// Replace the content with `p`, reusing the allocation when it fits.
    pub fn set(&mut self, p: &[u8]) -> usize {
        self.buf.clear();
        self.write_bytes(p)
    }

    /// Replace the content with `s`, reusing the allocation when it fits.
    pub fn set_text(&mut self, s: &str) -> usize {
        self.set(s.as_bytes())
    }
}

impl Write for ByteBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_bytes(buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for ByteBuffer {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s);
        Ok(())
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text_lossy())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl AsMut<[u8]> for ByteBuffer {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(value: &[u8]) -> Self {
        value.to_vec().into()
    }
}

impl From<&str> for ByteBuffer {
    fn from(value: &str) -> Self {
        value.as_bytes().into()
    }
}

impl From<ByteBuffer> for Vec<u8> {
    #[inline]
    fn from(value: ByteBuffer) -> Self {
        value.into_vec()
    }
}
