//! The candidate line-up.
//!
//! Order matches the printed report. The `text-splitter` candidate is only
//! available with the `text-splitter` cargo feature; without it the runner
//! prints `(not installed)` and moves on.

use crate::bench::Candidate;
use crate::{DelimiterChunker, FixedChunker, NaiveChunker, RecursiveChunker, SentenceChunker};

/// Separator hierarchy used by the `recursive` candidate.
const PROSE_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];

/// Every candidate, configured from [`BenchConfig::chunk_size`](crate::BenchConfig::chunk_size).
#[must_use]
pub fn default_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("delimiter", |c| {
            Ok(Box::new(DelimiterChunker::try_new(c.chunk_size)?))
        }),
        Candidate::new("fixed", |c| Ok(Box::new(FixedChunker::try_new(c.chunk_size, 0)?))),
        Candidate::new("recursive", |c| {
            Ok(Box::new(RecursiveChunker::try_new(c.chunk_size, PROSE_SEPARATORS)?))
        }),
        Candidate::new("sentence", |c| Ok(Box::new(SentenceChunker::try_new(c.chunk_size)?))).slow(),
        text_splitter(),
        Candidate::new("naive", |c| Ok(Box::new(NaiveChunker::try_new(c.chunk_size)?))),
    ]
}

#[cfg(feature = "text-splitter")]
fn text_splitter() -> Candidate {
    Candidate::new("text-splitter", |c| {
        Ok(Box::new(crate::TextSplitterChunker::try_new(c.chunk_size)?))
    })
    .slow()
}

#[cfg(not(feature = "text-splitter"))]
fn text_splitter() -> Candidate {
    Candidate::not_installed("text-splitter").slow()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup() {
        let names: Vec<_> = default_candidates()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(
            names,
            ["delimiter", "fixed", "recursive", "sentence", "text-splitter", "naive"]
        );
    }

    #[test]
    fn test_slow_candidates() {
        let slow: Vec<_> = default_candidates()
            .into_iter()
            .filter(|c| c.is_slow())
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(slow, ["sentence", "text-splitter"]);
    }
}
