//! The Slab type: a borrowed chunk with its position in the corpus.

/// A chunk of text with its position in the original document.
///
/// Slabs borrow from the text they were cut from. A benchmark pass over a
/// 100MB corpus produces tens of thousands of them, and copying each one
/// would put the allocator in every measurement.
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets into the original text, matching Rust's
/// string slicing semantics:
///
/// ```rust
/// use chunkmark::Slab;
///
/// let text = "Hello, world!";
/// let slab = Slab::new(&text[7..12], 7, 12, 0);
///
/// assert_eq!(&text[slab.span()], slab.text);
/// ```
///
/// Chunkers without overlap produce contiguous slabs: each `start` equals the
/// previous `end`, and concatenating the texts gives back the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab<'a> {
    /// The chunk text.
    pub text: &'a str,
    /// Byte offset where this chunk starts in the original document.
    pub start: usize,
    /// Byte offset where this chunk ends (exclusive).
    pub end: usize,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
}

impl<'a> Slab<'a> {
    /// Create a new slab.
    #[must_use]
    pub fn new(text: &'a str, start: usize, end: usize, index: usize) -> Self {
        debug_assert_eq!(text.len(), end - start);
        Self {
            text,
            start,
            end,
            index,
        }
    }

    /// The length of this chunk in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte span of this chunk in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Slab<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "slab #{} [{}..{}] ({} bytes)",
            self.index,
            self.start,
            self.end,
            self.len()
        )
    }
}
