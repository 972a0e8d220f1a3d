//! # chunkmark
//!
//! Throughput benchmarks for text chunking, and the chart that presents them.
//!
//! ## What Gets Measured
//!
//! Every chunker splits a document into bounded pieces ("slabs"), preferably at
//! natural delimiters. For retrieval pipelines the chunking pass sits in front
//! of everything else, so its throughput bounds how fast a corpus can be
//! ingested. This crate times a fixed set of chunkers over one corpus and
//! reports mean latency and throughput for each:
//!
//! ```text
//! Benchmarking enwik8 (100MB), 4KB chunks
//!
//! delimiter:           1.02 ms  (97902.1 MB/s)  [avg of 5 runs]
//! fixed:              12.40 ms  (8064.5 MB/s)  [avg of 5 runs]
//! recursive:         284.77 ms  (351.2 MB/s)  [avg of 5 runs]
//! sentence:      (running 1 iteration - slow)
//! sentence:        7412.55 ms  (13.5 MB/s)
//! text-splitter: (not installed)
//! naive:             31.90 ms  (3134.8 MB/s)  [avg of 5 runs]
//! ```
//!
//! The runner checks timing only. Chunk boundaries are never validated there;
//! the unit and property tests cover that.
//!
//! ## Chunkers
//!
//! | Chunker | Boundary rule | Cost |
//! |---------|---------------|------|
//! | [`DelimiterChunker`] | last of any delimiter in the window (memchr) | O(n), SIMD |
//! | [`NaiveChunker`] | last `\n`, else `.`, else `?` in the window | O(n) |
//! | [`FixedChunker`] | none, hard byte windows | O(n / size) |
//! | [`RecursiveChunker`] | separator hierarchy, coarsest first | O(n log n) |
//! | [`SentenceChunker`] | UAX #29 sentence boundaries | O(n), slow constant |
//!
//! ## Quick Start
//!
//! ```rust
//! use chunkmark::{Chunker, DelimiterChunker, NaiveChunker, RecursiveChunker};
//!
//! let text = "The quick brown fox jumps over the lazy dog.\nPack my box.";
//!
//! let slabs = NaiveChunker::new(16).chunk(text);
//! assert_eq!(slabs.iter().map(|s| s.text).collect::<String>(), text);
//!
//! let slabs = RecursiveChunker::prose(32).chunk(text);
//! assert!(slabs.iter().all(|s| s.len() <= 32));
//!
//! let slabs = DelimiterChunker::new(16).chunk("Hello. World. Again.");
//! assert_eq!(slabs[0].text, "Hello. World.");
//! assert_eq!(slabs[1].text, " Again.");
//! ```

mod bench;
mod candidates;
mod chart;
mod config;
mod corpus;
mod delimiter;
mod error;
#[cfg(feature = "text-splitter")]
mod external;
mod fixed;
mod logging;
mod naive;
mod palette;
mod recursive;
mod sentence;
mod slab;

pub use bench::{format_outcome, Candidate, Measurement, Outcome, Report, Runner};
pub use candidates::default_candidates;
pub use chart::{Chart, ChartBar, ChartEntry, DEFAULT_ENTRIES};
pub use config::{BenchConfig, ChartConfig};
pub use corpus::Corpus;
pub use delimiter::{
    chunk, DelimiterChunker, DelimiterIter, DEFAULT_DELIMITERS, DEFAULT_TARGET_SIZE,
};
pub use error::{Error, Result};
#[cfg(feature = "text-splitter")]
pub use external::TextSplitterChunker;
pub use fixed::FixedChunker;
pub use logging::{init_logging, parse_level};
pub use naive::NaiveChunker;
pub use recursive::RecursiveChunker;
pub use sentence::SentenceChunker;
pub use slab::Slab;

/// A text chunking strategy.
///
/// Chunkers are the unit the benchmark runner times. Any implementation can be
/// boxed and handed to a [`Candidate`]:
///
/// ```rust
/// use chunkmark::{Chunker, FixedChunker, NaiveChunker, Slab};
///
/// fn count(chunker: &dyn Chunker, text: &str) -> usize {
///     chunker.chunk(text).len()
/// }
///
/// let text = "Hello world. This is a test.";
/// assert_eq!(count(&FixedChunker::no_overlap(10), text), 3);
/// assert_eq!(count(&NaiveChunker::new(100), text), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each [`Slab`] borrows its text from `text` and records its byte span.
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Used for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / 500).max(1)
    }
}

/// Largest char boundary in `text` that is `<= index`.
///
/// Stand-in for `str::floor_char_boundary`, which is not stable on our MSRV.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary in `text` that is `>= index`.
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Turn contiguous end offsets into slabs.
///
/// `ends` must be strictly increasing char boundaries with the last equal to
/// `text.len()`.
pub(crate) fn slabs_from_ends<'a>(text: &'a str, ends: impl IntoIterator<Item = usize>) -> Vec<Slab<'a>> {
    let mut start = 0;
    ends.into_iter()
        .enumerate()
        .map(|(index, end)| {
            let slab = Slab::new(&text[start..end], start, end, index);
            start = end;
            slab
        })
        .collect()
}
