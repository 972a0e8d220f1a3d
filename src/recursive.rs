//! Recursive character splitting (LangChain-style).
//!
//! Tries progressively finer separators until every chunk fits.
//!
//! ## The Algorithm
//!
//! Given separators `["\n\n", "\n", ". ", " "]` and `max_size = 100`:
//!
//! ```text
//! 1. Cut after every "\n\n" (paragraphs)
//! 2. Greedily merge neighbouring pieces while the merge stays <= 100 bytes
//! 3. A merged piece still > 100 bytes is split again on "\n", then ". ",
//!    then " "
//! 4. Out of separators: force split at 100 bytes (char-aligned)
//! ```
//!
//! Separators stay attached to the end of the piece they terminate, so the
//! chunks are contiguous and concatenate back to the input. Work is done on
//! byte ranges of the input; no intermediate strings are built.

use std::ops::Range;

use crate::error::{check_size, Error, Result};
use crate::{ceil_char_boundary, floor_char_boundary, slabs_from_ends, Chunker, Slab};

/// Recursive character splitter.
///
/// ## Example
///
/// ```rust
/// use chunkmark::{Chunker, RecursiveChunker};
///
/// let chunker = RecursiveChunker::new(50, &["\n\n", "\n", ". ", " "]);
/// let text = "Paragraph one.\n\nParagraph two is longer and might need splitting.";
/// let slabs = chunker.chunk(text);
///
/// assert_eq!(slabs[0].text, "Paragraph one.\n\n");
/// assert!(slabs.iter().all(|s| s.len() <= 50));
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    max_size: usize,
    separators: Vec<String>,
}

impl RecursiveChunker {
    /// Create a new recursive chunker.
    ///
    /// # Arguments
    ///
    /// * `max_size` - Maximum chunk size in bytes
    /// * `separators` - Hierarchy of separators, coarsest first
    ///
    /// # Panics
    ///
    /// Panics if `max_size == 0` or `separators` is empty.
    #[must_use]
    pub fn new(max_size: usize, separators: &[&str]) -> Self {
        assert!(max_size > 0, "max_size must be > 0");
        assert!(!separators.is_empty(), "separators must not be empty");
        Self::build(max_size, separators)
    }

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`] for a zero size, [`Error::NoSeparators`]
    /// for an empty separator list.
    pub fn try_new(max_size: usize, separators: &[&str]) -> Result<Self> {
        check_size(max_size)?;
        if separators.is_empty() {
            return Err(Error::NoSeparators);
        }
        Ok(Self::build(max_size, separators))
    }

    fn build(max_size: usize, separators: &[&str]) -> Self {
        Self {
            max_size,
            // An empty separator never splits anything.
            separators: separators
                .iter()
                .filter(|s| !s.is_empty())
                .map(|&s| s.to_string())
                .collect(),
        }
    }

    /// Default separators for prose.
    #[must_use]
    pub fn prose(max_size: usize) -> Self {
        Self::new(max_size, &["\n\n", "\n", ". ", " "])
    }

    /// Default separators for Markdown.
    #[must_use]
    pub fn markdown(max_size: usize) -> Self {
        Self::new(max_size, &["\n## ", "\n### ", "\n\n", "\n", ". ", " "])
    }

    /// Split `text[range]` starting at separator `sep_index`, pushing chunk
    /// end offsets onto `ends`.
    fn split_range(&self, text: &str, range: Range<usize>, sep_index: usize, ends: &mut Vec<usize>) {
        if range.len() <= self.max_size {
            ends.push(range.end);
            return;
        }
        let Some(sep) = self.separators.get(sep_index) else {
            self.force_split(text, range, ends);
            return;
        };

        let mut pieces = text[range.clone()]
            .match_indices(sep.as_str())
            .map(|(idx, m)| range.start + idx + m.len())
            .filter(|&end| end < range.end)
            .peekable();

        if pieces.peek().is_none() {
            self.split_range(text, range, sep_index + 1, ends);
            return;
        }

        // Greedy merge: [current.start, current.end) grows while it fits.
        let mut current = range.start..range.start;
        for piece_end in pieces.chain(std::iter::once(range.end)) {
            if current.is_empty() || piece_end - current.start <= self.max_size {
                current.end = piece_end;
            } else {
                self.split_range(text, current.clone(), sep_index + 1, ends);
                current = current.end..piece_end;
            }
        }
        if !current.is_empty() {
            self.split_range(text, current, sep_index + 1, ends);
        }
    }

    /// Force split at char boundaries when no separator is left.
    fn force_split(&self, text: &str, range: Range<usize>, ends: &mut Vec<usize>) {
        let mut start = range.start;
        while start < range.end {
            let mut end = floor_char_boundary(text, (start + self.max_size).min(range.end));
            if end <= start {
                end = ceil_char_boundary(text, start + 1);
            }
            ends.push(end);
            start = end;
        }
    }
}

impl Chunker for RecursiveChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        let mut ends = Vec::with_capacity(self.estimate_chunks(text.len()));
        if !text.is_empty() {
            self.split_range(text, 0..text.len(), 0, &mut ends);
        }
        slabs_from_ends(text, ends)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / self.max_size).max(1)
    }
}
