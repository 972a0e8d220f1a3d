//! Delimiter chunking with memchr.
//!
//! Same contract as the naive baseline (cut after the last delimiter in a
//! `size`-byte window, hard split if there is none), with two differences:
//!
//! - Every delimiter is searched in one reverse pass. The cut lands after the
//!   last occurrence of *any* delimiter; there is no priority order.
//! - The search works on bytes and uses the SIMD routines from `memchr`.
//!
//! ## Search Strategy
//!
//! | Delimiters | Search |
//! |------------|--------|
//! | 0 | none, always hard split |
//! | 1-3 | `memrchr` / `memrchr2` / `memrchr3` |
//! | 4+ | 256-entry lookup table, reverse scan |
//! | pattern | `memmem::FinderRev` for a multi-byte sequence |
//!
//! ## Prefix Mode
//!
//! By default the delimiter ends the current chunk. In prefix mode it starts
//! the next one instead, which suits markers such as SentencePiece's `▁`:
//!
//! ```text
//! "a▁b▁c", pattern "▁", size 7
//!
//! suffix: ["a▁", "b▁c"]
//! prefix: ["a", "▁b", "▁c"]
//! ```

use memchr::memmem::FinderRev;

use crate::error::{check_size, Result};
use crate::{slabs_from_ends, Chunker, Slab};

/// Default chunk target size (4KB).
pub const DEFAULT_TARGET_SIZE: usize = 4096;

/// Default delimiters: newline, period, question mark.
pub const DEFAULT_DELIMITERS: &[u8] = b"\n.?";

/// Chunk bytes at delimiter boundaries.
///
/// Returns an iterator with defaults (4KB chunks, `\n.?` delimiters) that can
/// be reconfigured before the first call to `next`:
///
/// ```rust
/// use chunkmark::chunk;
///
/// let text = b"First sentence. Second sentence. Third sentence.";
///
/// let chunks: Vec<&[u8]> = chunk(text).size(20).collect();
/// assert_eq!(chunks[0], b"First sentence.");
///
/// let chunks: Vec<&[u8]> = chunk(text).size(20).delimiters(b" ").collect();
/// assert_eq!(chunks[0], b"First sentence. ");
/// ```
pub fn chunk(text: &[u8]) -> DelimiterIter<'_> {
    DelimiterIter::new(text)
}

enum Search {
    None,
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
    Table(Box<[bool; 256]>),
    Pattern(FinderRev<'static>, usize),
}

impl Search {
    fn build(delimiters: &[u8], pattern: Option<&[u8]>) -> Self {
        if let Some(pattern) = pattern.filter(|p| !p.is_empty()) {
            return Self::Pattern(FinderRev::new(pattern).into_owned(), pattern.len());
        }
        match *delimiters {
            [] => Self::None,
            [a] => Self::One(a),
            [a, b] => Self::Two(a, b),
            [a, b, c] => Self::Three(a, b, c),
            _ => {
                let mut table = Box::new([false; 256]);
                for &b in delimiters {
                    table[usize::from(b)] = true;
                }
                Self::Table(table)
            }
        }
    }

    /// Start and length of the last match in `window`.
    #[inline]
    fn rfind(&self, window: &[u8]) -> Option<(usize, usize)> {
        let one = |idx| (idx, 1);
        match self {
            Self::None => None,
            Self::One(a) => memchr::memrchr(*a, window).map(one),
            Self::Two(a, b) => memchr::memrchr2(*a, *b, window).map(one),
            Self::Three(a, b, c) => memchr::memrchr3(*a, *b, *c, window).map(one),
            Self::Table(table) => window
                .iter()
                .rposition(|&b| table[usize::from(b)])
                .map(one),
            Self::Pattern(finder, len) => finder.rfind(window).map(|idx| (idx, *len)),
        }
    }
}

/// Iterator over delimiter-bounded byte chunks.
///
/// Created via [`chunk()`].
pub struct DelimiterIter<'a> {
    text: &'a [u8],
    target_size: usize,
    delimiters: &'a [u8],
    pattern: Option<&'a [u8]>,
    prefix: bool,
    utf8: bool,
    pos: usize,
    search: Option<Search>,
}

impl<'a> DelimiterIter<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            target_size: DEFAULT_TARGET_SIZE,
            delimiters: DEFAULT_DELIMITERS,
            pattern: None,
            prefix: false,
            utf8: false,
            pos: 0,
            search: None,
        }
    }

    /// Set the target chunk size in bytes. Zero is treated as one.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.target_size = size.max(1);
        self
    }

    /// Set the single-byte delimiters to split on.
    #[must_use]
    pub fn delimiters(mut self, delimiters: &'a [u8]) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Split on a multi-byte pattern instead of single-byte delimiters.
    #[must_use]
    pub fn pattern(mut self, pattern: &'a [u8]) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Put the delimiter at the start of the next chunk.
    #[must_use]
    pub fn prefix(mut self) -> Self {
        self.prefix = true;
        self
    }

    /// Keep every cut on a UTF-8 char boundary.
    fn utf8(mut self) -> Self {
        self.utf8 = true;
        self
    }

    fn is_continuation(&self, at: usize) -> bool {
        self.text.get(at).is_some_and(|&b| b & 0xC0 == 0x80)
    }

    /// Move a cut point off a continuation byte, never back to `self.pos`.
    fn align(&self, mut split_at: usize) -> usize {
        let mut back = split_at;
        while back > self.pos && self.is_continuation(back) {
            back -= 1;
        }
        if back > self.pos {
            return back;
        }
        while self.is_continuation(split_at) {
            split_at += 1;
        }
        split_at
    }
}

impl<'a> Iterator for DelimiterIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let remaining = self.text.len() - self.pos;
        if remaining <= self.target_size {
            let chunk = &self.text[self.pos..];
            self.pos = self.text.len();
            return Some(chunk);
        }

        let search = self
            .search
            .get_or_insert_with(|| Search::build(self.delimiters, self.pattern));

        let end = self.pos + self.target_size;
        let window = &self.text[self.pos..end];

        let split_at = match search.rfind(window) {
            Some((idx, _)) if self.prefix && idx > 0 => self.pos + idx,
            Some((idx, len)) if !self.prefix => self.pos + idx + len,
            _ => end,
        };
        let split_at = if self.utf8 { self.align(split_at) } else { split_at };

        let chunk = &self.text[self.pos..split_at];
        self.pos = split_at;
        Some(chunk)
    }
}

/// [`Chunker`] over UTF-8 text built on [`DelimiterIter`].
///
/// ## Example
///
/// ```rust
/// use chunkmark::{Chunker, DelimiterChunker};
///
/// let chunker = DelimiterChunker::new(14).delimiters(b".?!");
/// let slabs = chunker.chunk("Hello? World. Yes!");
///
/// assert_eq!(slabs[0].text, "Hello? World.");
/// ```
#[derive(Debug, Clone)]
pub struct DelimiterChunker {
    size: usize,
    delimiters: Vec<u8>,
    pattern: Option<Vec<u8>>,
    prefix: bool,
}

impl DelimiterChunker {
    /// Create a chunker with the default `\n.?` delimiters.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "chunk size must be > 0");
        Self {
            size,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            pattern: None,
            prefix: false,
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

    /// Set the single-byte delimiters.
    #[must_use]
    pub fn delimiters(mut self, delimiters: &[u8]) -> Self {
        self.delimiters = delimiters.to_vec();
        self
    }

    /// Split on a multi-byte pattern such as `"▁"`.
    #[must_use]
    pub fn pattern(mut self, pattern: &[u8]) -> Self {
        self.pattern = Some(pattern.to_vec());
        self
    }

    /// Put the delimiter at the start of the next chunk.
    #[must_use]
    pub fn prefix(mut self) -> Self {
        self.prefix = true;
        self
    }
}

impl Default for DelimiterChunker {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SIZE)
    }
}

impl Chunker for DelimiterChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        let mut iter = chunk(text.as_bytes())
            .size(self.size)
            .delimiters(&self.delimiters)
            .utf8();
        if let Some(pattern) = &self.pattern {
            iter = iter.pattern(pattern);
        }
        if self.prefix {
            iter = iter.prefix();
        }

        let mut end = 0;
        let ends = iter.map(|piece| {
            end += piece.len();
            end
        });
        slabs_from_ends(text, ends)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        text_len.div_ceil(self.size)
    }
}
