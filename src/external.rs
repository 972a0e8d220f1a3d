//! Adapter for the `text-splitter` crate.

use text_splitter::{Characters, ChunkConfig, TextSplitter};

use crate::error::{check_size, Result};
use crate::{Chunker, Slab};

/// [`Chunker`] backed by [`text_splitter::TextSplitter`].
///
/// Chunks are measured in characters, capped at `size`, and not trimmed, so
/// they stay contiguous like the built-in chunkers.
pub struct TextSplitterChunker {
    splitter: TextSplitter<Characters>,
}

impl TextSplitterChunker {
    /// Build a splitter with a `size`-character cap.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`](crate::Error::InvalidChunkSize) for a zero size.
    pub fn try_new(size: usize) -> Result<Self> {
        check_size(size)?;
        let config = ChunkConfig::new(size).with_trim(false);
        Ok(Self {
            splitter: TextSplitter::new(config),
        })
    }
}

impl Chunker for TextSplitterChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        self.splitter
            .chunk_indices(text)
            .enumerate()
            .map(|(index, (offset, piece))| Slab::new(piece, offset, offset + piece.len(), index))
            .collect()
    }
}
