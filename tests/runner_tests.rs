//! End-to-end tests for the timing runner and its printed report.

use std::thread;
use std::time::Duration;

use chunkmark::{
    default_candidates, BenchConfig, Candidate, Chunker, Corpus, Error, NaiveChunker, Outcome,
    Runner, Slab,
};

/// Sleeps for a fixed delay and returns one chunk.
struct Sleepy(Duration);

impl Chunker for Sleepy {
    fn chunk<'a>(&self, text: &'a str) -> Vec<Slab<'a>> {
        thread::sleep(self.0);
        vec![Slab::new(text, 0, text.len(), 0)]
    }
}

fn sleepy(name: &str, delay: Duration) -> Candidate {
    Candidate::new(name, move |_| Ok(Box::new(Sleepy(delay))))
}

fn run(corpus: &Corpus, config: &BenchConfig, candidates: &[Candidate]) -> (String, Vec<Outcome>) {
    let mut out = Vec::new();
    let reports = Runner::new(corpus, config)
        .run_all(candidates, &mut out)
        .unwrap();
    let outcomes = reports.into_iter().map(|r| r.outcome).collect();
    (String::from_utf8(out).unwrap(), outcomes)
}

#[test]
fn mean_tracks_chunker_delay() {
    let delay = Duration::from_millis(20);
    let corpus = Corpus::from_text("tiny", "x".repeat(10_000));
    let config = BenchConfig {
        runs: 3,
        ..BenchConfig::default()
    };

    let report = Runner::new(&corpus, &config).measure(&sleepy("sleepy", delay));
    let Outcome::Measured(m) = report.outcome else {
        panic!("expected a measurement, got {:?}", report.outcome);
    };

    assert_eq!(m.runs, 3);
    assert!(m.mean >= delay, "mean {:?} below sleep {:?}", m.mean, delay);
    assert!(m.mean < delay * 10, "mean {:?} unreasonably high", m.mean);

    let expected = corpus.len() as f64 / m.mean.as_secs_f64();
    assert!((m.bytes_per_sec - expected).abs() / expected < 1e-9);
}

#[test]
fn missing_candidate_does_not_stop_the_run() {
    let corpus = Corpus::from_text("tiny", "Hello.\nWorld?");
    let config = BenchConfig {
        runs: 2,
        ..BenchConfig::default()
    };
    let candidates = [
        Candidate::not_installed("text-splitter").slow(),
        Candidate::new("naive", |c| Ok(Box::new(NaiveChunker::try_new(c.chunk_size)?))),
    ];

    let (out, outcomes) = run(&corpus, &config, &candidates);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Benchmarking tiny (0MB), 4KB chunks");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "text-splitter: (not installed)");
    assert!(lines[3].starts_with("naive:"));
    assert!(lines[3].ends_with("[avg of 2 runs]"));
    assert_eq!(lines.len(), 4);

    assert_eq!(outcomes[0], Outcome::NotInstalled);
    assert!(matches!(outcomes[1], Outcome::Measured(_)));
}

#[test]
fn build_error_is_reported_inline() {
    let corpus = Corpus::from_text("tiny", "abc");
    let config = BenchConfig {
        chunk_size: 0,
        runs: 1,
        ..BenchConfig::default()
    };
    let candidates = [
        Candidate::new("naive", |c| Ok(Box::new(NaiveChunker::try_new(c.chunk_size)?))),
        Candidate::new("custom", |_| Err(Error::NoSeparators)),
    ];

    let (out, outcomes) = run(&corpus, &config, &candidates);

    assert!(out.contains("naive:         (error: invalid chunk size: 0 (must be > 0))"));
    assert!(out.contains("custom:        (error: separator list is empty)"));
    assert!(outcomes.iter().all(|o| matches!(o, Outcome::Errored(_))));
}

#[test]
fn slow_candidate_announces_single_iteration() {
    let corpus = Corpus::from_text("tiny", "abc");
    let config = BenchConfig {
        runs: 4,
        ..BenchConfig::default()
    };
    let candidates = [sleepy("sentence", Duration::from_millis(1)).slow()];

    let (out, outcomes) = run(&corpus, &config, &candidates);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[2], "sentence:      (running 1 iteration - slow)");
    assert!(lines[3].starts_with("sentence:"));
    assert!(lines[3].ends_with("MB/s)"), "single runs carry no average suffix");
    assert!(matches!(&outcomes[0], Outcome::Measured(m) if m.runs == 1));
}

#[test]
fn panicking_candidate_is_reported() {
    struct Boom;
    impl Chunker for Boom {
        fn chunk<'a>(&self, _text: &'a str) -> Vec<Slab<'a>> {
            panic!("index out of range");
        }
    }

    let corpus = Corpus::from_text("tiny", "abc");
    let config = BenchConfig::default();
    let candidates = [
        Candidate::new("boom", |_| Ok(Box::new(Boom))),
        sleepy("after", Duration::ZERO),
    ];

    let (out, outcomes) = run(&corpus, &config, &candidates);

    assert!(out.contains("boom:          (error: panicked: index out of range)"));
    assert!(matches!(outcomes[1], Outcome::Measured(_)));
}

#[test]
fn default_lineup_runs_over_small_corpus() {
    let text = "The quick brown fox. Jumps over? The lazy dog.\n".repeat(500);
    let corpus = Corpus::from_text("prose", text);
    let config = BenchConfig {
        chunk_size: 256,
        runs: 2,
        ..BenchConfig::default()
    };

    let (out, outcomes) = run(&corpus, &config, &default_candidates());

    assert_eq!(outcomes.len(), 6);
    // index 4 is text-splitter, which depends on the cargo feature
    for (i, outcome) in outcomes.iter().enumerate().filter(|(i, _)| *i != 4) {
        assert!(matches!(outcome, Outcome::Measured(_)), "#{i}: {outcome:?}");
    }
    #[cfg(not(feature = "text-splitter"))]
    assert!(out.contains("text-splitter: (not installed)"));
    assert!(out.contains("sentence:      (running 1 iteration - slow)"));
}
