//! Re-chunking of arbitrarily sized input chunks into fixed-size parts.
//!
//! Multipart storage APIs want uniform parts; HTTP bodies arrive in whatever
//! chunk sizes the network produces. `PartBuffer` sits between the two,
//! accumulating input until a full part is available and emitting each full
//! part exactly once.

use bytes::{Bytes, BytesMut};

/// Accumulates input chunks and emits fixed-size parts.
///
/// Input bytes are appended to an internal buffer. Every time the buffer
/// reaches the configured part size it is split off and emitted, so a single
/// `push` can yield zero, one, or many parts. Bytes left over after the last
/// full part stay buffered for the next `push` or the final `finish`.
pub struct PartBuffer {
    part_size: usize,
    buffer: BytesMut,
}

impl PartBuffer {
    /// Create a buffer that emits parts of exactly `part_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `part_size` is zero.
    pub fn new(part_size: usize) -> Self {
        assert!(part_size > 0, "part size must be non-zero");
        PartBuffer {
            part_size,
            buffer: BytesMut::with_capacity(part_size),
        }
    }

    /// Append a chunk and return every full part it completes, in order.
    ///
    /// A chunk that exactly fills the remaining space flushes immediately.
    /// Chunks larger than the part size are consumed by repeated
    /// fill-and-flush, so they re-chunk into multiple parts in one call.
    /// Zero-length chunks are a no-op.
    pub fn push(&mut self, mut chunk: &[u8]) -> Vec<Bytes> {
        let mut parts = Vec::new();

        while !chunk.is_empty() {
            let remaining = self.part_size - self.buffer.len();

            if chunk.len() < remaining {
                self.buffer.extend_from_slice(chunk);
                break;
            }

            let (fill, rest) = chunk.split_at(remaining);
            self.buffer.extend_from_slice(fill);
            parts.push(self.buffer.split().freeze());
            chunk = rest;
        }

        parts
    }

    /// Consume the buffer and return the final partial part, if any.
    ///
    /// Returns `None` when no bytes are buffered, so an input stream whose
    /// length is an exact multiple of the part size never produces a
    /// trailing empty part.
    pub fn finish(mut self) -> Option<Bytes> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.split().freeze())
        }
    }

    /// Number of bytes currently buffered, always less than the part size
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// The configured part size
    pub fn part_size(&self) -> usize {
        self.part_size
    }
}
