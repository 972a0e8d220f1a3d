//! Fixed-size chunking with optional overlap.
//!
//! Split every N bytes, stepping forward by `N - overlap`. This is the floor
//! every boundary-aware chunker is compared against: no scanning, just slicing.
//!
//! ```text
//! size = 10, overlap = 3
//!
//! Document: "abcdefghijklmnopqrstuvwxyz"
//!
//! Chunk 0: "abcdefghij"   [0..10]
//! Chunk 1: "hijklmnopq"   [7..17]
//! Chunk 2: "opqrstuvwx"   [14..24]
//! Chunk 3: "vwxyz"        [21..26]
//! ```
//!
//! Window edges are pulled back to UTF-8 char boundaries, so a chunk can come
//! out up to three bytes short of `size` on multibyte text.

use crate::error::{check_size, Error, Result};
use crate::{ceil_char_boundary, floor_char_boundary, Chunker, Slab};

/// Fixed-size chunker with configurable overlap.
///
/// ## Example
///
/// ```rust
/// use chunkmark::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::new(100, 20);
/// let text = "A".repeat(250);
/// let slabs = chunker.chunk(&text);
///
/// assert_eq!(slabs[0].len(), 100);
/// assert_eq!(slabs[1].start, 80);
/// assert_eq!(slabs.last().unwrap().end, 250);
/// ```
#[derive(Debug, Clone)]
pub struct FixedChunker {
    size: usize,
    overlap: usize,
}

impl FixedChunker {
    /// Create a new fixed-size chunker.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0` or `overlap >= size`.
    #[must_use]
    pub fn new(size: usize, overlap: usize) -> Self {
        assert!(size > 0, "chunk size must be > 0");
        assert!(overlap < size, "overlap must be < size");
        Self { size, overlap }
    }

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`] for a zero size,
    /// [`Error::OverlapExceedsSize`] when `overlap >= size`.
    pub fn try_new(size: usize, overlap: usize) -> Result<Self> {
        check_size(size)?;
        if overlap >= size {
            return Err(Error::OverlapExceedsSize { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// Create a chunker with no overlap.
    #[must_use]
    pub fn no_overlap(size: usize) -> Self {
        Self::new(size, 0)
    }

    fn step(&self) -> usize {
        self.size - self.overlap
    }
}

impl Chunker for FixedChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        let mut slabs = Vec::with_capacity(self.estimate_chunks(text.len()));
        let mut start = 0;

        while start < text.len() {
            let mut end = floor_char_boundary(text, start + self.size);
            if end <= start {
                // size smaller than the char at `start`
                end = ceil_char_boundary(text, start + 1);
            }
            slabs.push(Slab::new(&text[start..end], start, end, slabs.len()));

            if end == text.len() {
                break;
            }
            // Always advance, even when the window shrank below the step.
            let next = ceil_char_boundary(text, start + self.step());
            start = if next > start { next.min(end) } else { end };
        }

        slabs
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        text_len.div_ceil(self.step())
    }
}
