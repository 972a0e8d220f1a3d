//! Error types for chunkmark.

use std::path::PathBuf;

/// Errors raised while building chunkers, running candidates, or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap exceeds chunk size.
    #[error("overlap {overlap} exceeds chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that exceeded the size.
        overlap: usize,
    },

    /// Recursive chunking needs at least one separator.
    #[error("separator list is empty")]
    NoSeparators,

    /// The corpus file could not be read.
    #[error("failed to read corpus {}: {source}", path.display())]
    CorpusRead {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The candidate was not compiled into this build.
    #[error("not installed")]
    NotInstalled,

    /// The candidate panicked while chunking.
    #[error("panicked: {0}")]
    Panicked(String),

    /// The chart could not be rasterised or encoded.
    #[error("render error: {0}")]
    Render(String),

    /// Writing an output file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for chunkmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject a zero chunk size.
pub(crate) fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        Err(Error::InvalidChunkSize(size))
    } else {
        Ok(())
    }
}
