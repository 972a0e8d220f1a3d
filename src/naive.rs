//! Naive delimiter chunking: the baseline.
//!
//! Take a window of `size` bytes. Unless it is the tail of the document, cut
//! it after the last newline in the window; failing that, after the last
//! period; failing that, after the last question mark; failing that, at the
//! window edge.
//!
//! ```text
//! size = 16, delimiters in priority order ["\n", ".", "?"]
//!
//! "Hello\nWorld. Is it? Yes"
//!  window 0..16 = "Hello\nWorld. Is "
//!  last '\n' at 5             -> chunk "Hello\n"        [0..6]
//!  window 6..22 = "World. Is it? Ye"
//!  no '\n', last '.' at 5     -> chunk "World."         [6..12]
//!  remainder fits             -> chunk " Is it? Yes"   [12..23]
//! ```
//!
//! Each delimiter gets its own reverse scan, so a window with no newline is
//! walked up to three times. [`DelimiterChunker`](crate::DelimiterChunker)
//! does the same job in one pass.

use crate::error::{check_size, Result};
use crate::{ceil_char_boundary, floor_char_boundary, slabs_from_ends, Chunker, Slab};

/// Baseline delimiter chunker with a fixed priority order.
#[derive(Debug, Clone)]
pub struct NaiveChunker {
    size: usize,
    delimiters: Vec<char>,
}

impl NaiveChunker {
    /// Delimiters tried in order: newline, period, question mark.
    pub const DEFAULT_DELIMITERS: [char; 3] = ['\n', '.', '?'];

    /// Create a chunker with the default delimiters.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "chunk size must be > 0");
        Self {
            size,
            delimiters: Self::DEFAULT_DELIMITERS.to_vec(),
        }
    }

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`](crate::Error::InvalidChunkSize) for a zero size.
    pub fn try_new(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self::new(size))
    }

    /// Replace the delimiter priority list.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: &[char]) -> Self {
        self.delimiters = delimiters.to_vec();
        self
    }

    /// End offset of the chunk starting at `pos`.
    fn chunk_end(&self, text: &str, pos: usize) -> usize {
        let mut end = floor_char_boundary(text, pos + self.size);
        if end <= pos {
            end = ceil_char_boundary(text, pos + 1);
        }
        if end >= text.len() {
            return text.len();
        }

        let window = &text[pos..end];
        self.delimiters
            .iter()
            .find_map(|&delim| window.rfind(delim).map(|idx| pos + idx + delim.len_utf8()))
            .unwrap_or(end)
    }
}

impl Chunker for NaiveChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        let mut ends = Vec::with_capacity(self.estimate_chunks(text.len()));
        let mut pos = 0;
        while pos < text.len() {
            pos = self.chunk_end(text, pos);
            ends.push(pos);
        }
        slabs_from_ends(text, ends)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        text_len.div_ceil(self.size)
    }
}
