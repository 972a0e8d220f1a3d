//! Timing harness.
//!
//! The runner builds each candidate, calls `chunk` on the whole corpus a fixed
//! number of times, and reports the mean wall-clock duration and the derived
//! throughput:
//!
//! ```text
//! throughput = corpus bytes / mean seconds
//! ```
//!
//! A candidate that is not compiled in, fails to build, or panics while
//! chunking is reported on its own line. The remaining candidates still run.

use std::convert::Infallible;
use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::Chunker;

/// Width of the `name:` column in result lines.
const NAME_WIDTH: usize = 14;

type Build = dyn Fn(&BenchConfig) -> Result<Box<dyn Chunker>>;

/// One chunker under test.
///
/// Candidates are built lazily so that a missing or misconfigured chunker is
/// reported instead of aborting the run.
pub struct Candidate {
    name: String,
    slow: bool,
    build: Box<Build>,
}

impl Candidate {
    /// A candidate built from the runner configuration.
    pub fn new(
        name: impl Into<String>,
        build: impl Fn(&BenchConfig) -> Result<Box<dyn Chunker>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            slow: false,
            build: Box::new(build),
        }
    }

    /// A candidate whose implementation is not part of this build.
    pub fn not_installed(name: impl Into<String>) -> Self {
        Self::new(name, |_| Err(Error::NotInstalled))
    }

    /// Mark as slow: timed with [`BenchConfig::slow_runs`] iterations.
    #[must_use]
    pub fn slow(mut self) -> Self {
        self.slow = true;
        self
    }

    /// Candidate name as printed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the candidate gets the reduced iteration count.
    #[must_use]
    pub fn is_slow(&self) -> bool {
        self.slow
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("slow", &self.slow)
            .finish_non_exhaustive()
    }
}

/// Aggregated timing of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Number of timed runs.
    pub runs: usize,
    /// Arithmetic mean of the run durations.
    pub mean: Duration,
    /// Corpus bytes divided by the mean, in bytes per second.
    pub bytes_per_sec: f64,
}

impl Measurement {
    /// Aggregate raw samples over a corpus of `bytes` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    #[must_use]
    pub fn from_samples(samples: &[Duration], bytes: usize) -> Self {
        assert!(!samples.is_empty(), "at least one sample is required");
        let total: Duration = samples.iter().sum();
        let mean = mean_duration(total, samples.len());
        let secs = mean.as_secs_f64();
        let bytes_per_sec = if secs > 0.0 {
            bytes as f64 / secs
        } else {
            f64::INFINITY
        };
        Self {
            runs: samples.len(),
            mean,
            bytes_per_sec,
        }
    }

    /// Mean duration in milliseconds.
    #[must_use]
    pub fn mean_ms(&self) -> f64 {
        self.mean.as_secs_f64() * 1e3
    }

    /// Throughput in decimal megabytes per second.
    #[must_use]
    pub fn mb_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1e6
    }

    /// Throughput in decimal gigabytes per second, the unit of the chart.
    #[must_use]
    pub fn gb_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1e9
    }
}

/// What happened to a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Timed successfully.
    Measured(Measurement),
    /// Not compiled into this build.
    NotInstalled,
    /// Failed to build or panicked while chunking.
    Errored(String),
}

/// Result line for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Candidate name.
    pub name: String,
    /// Timing or failure.
    pub outcome: Outcome,
}

/// `total / count`, exact while `count` fits in a `u32`.
fn mean_duration(total: Duration, count: usize) -> Duration {
    match u32::try_from(count) {
        Ok(n) => total / n,
        Err(_) => total.div_f64(count as f64),
    }
}

fn label(name: &str) -> String {
    format!("{name}:")
}

/// Format a report as a fixed-width result line.
///
/// ```rust
/// use chunkmark::{format_outcome, Outcome, Report};
///
/// let report = Report { name: "langchain".into(), outcome: Outcome::NotInstalled };
/// assert_eq!(format_outcome(&report), "langchain:     (not installed)");
/// ```
#[must_use]
pub fn format_outcome(report: &Report) -> String {
    let label = label(&report.name);
    match &report.outcome {
        Outcome::Measured(m) if m.runs > 1 => format!(
            "{label:NAME_WIDTH$} {:>10.2} ms  ({:.1} MB/s)  [avg of {} runs]",
            m.mean_ms(),
            m.mb_per_sec(),
            m.runs
        ),
        Outcome::Measured(m) => format!(
            "{label:NAME_WIDTH$} {:>10.2} ms  ({:.1} MB/s)",
            m.mean_ms(),
            m.mb_per_sec()
        ),
        Outcome::NotInstalled => format!("{label:NAME_WIDTH$} (not installed)"),
        Outcome::Errored(message) => format!("{label:NAME_WIDTH$} (error: {message})"),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Times candidates over one corpus.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'c> {
    corpus: &'c Corpus,
    config: &'c BenchConfig,
}

impl<'c> Runner<'c> {
    /// Create a runner.
    #[must_use]
    pub fn new(corpus: &'c Corpus, config: &'c BenchConfig) -> Self {
        Self { corpus, config }
    }

    /// First line of the output.
    ///
    /// Chunk sizes that are whole kibibytes print as `KB`, anything else in
    /// bytes.
    #[must_use]
    pub fn header(&self) -> String {
        let size = self.config.chunk_size;
        let chunks = if size >= 1024 && size % 1024 == 0 {
            format!("{}KB", size / 1024)
        } else {
            format!("{size}B")
        };
        format!(
            "Benchmarking {} ({:.0}MB), {chunks} chunks",
            self.corpus.name(),
            self.corpus.size_mb(),
        )
    }

    /// Timed iterations for `candidate`, at least one.
    #[must_use]
    pub fn runs_for(&self, candidate: &Candidate) -> usize {
        let runs = if candidate.is_slow() {
            self.config.slow_runs
        } else {
            self.config.runs
        };
        runs.max(1)
    }

    /// Time `chunker` over the corpus `runs` times.
    ///
    /// # Errors
    ///
    /// [`Error::Panicked`] if any run panics. Samples already taken are
    /// discarded.
    pub fn time(&self, chunker: &dyn Chunker, runs: usize) -> Result<Measurement> {
        let text = self.corpus.text();
        let mut samples = Vec::with_capacity(runs);

        for run in 0..runs.max(1) {
            let start = Instant::now();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                black_box(chunker.chunk(black_box(text)))
            }));
            let elapsed = start.elapsed();

            let slabs = result.map_err(|payload| Error::Panicked(panic_message(&*payload)))?;
            debug!(run, chunks = slabs.len(), ?elapsed, "run finished");
            samples.push(elapsed);
        }

        Ok(Measurement::from_samples(&samples, self.corpus.len()))
    }

    /// Build and time one candidate without printing anything.
    #[must_use]
    pub fn measure(&self, candidate: &Candidate) -> Report {
        match self.build_and_time(candidate, |_| Ok::<(), Infallible>(())) {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Run every candidate in order, writing the header and one line per
    /// candidate to `out`.
    ///
    /// # Errors
    ///
    /// Only write errors on `out`. Candidate failures are reported inline.
    pub fn run_all<W: Write>(&self, candidates: &[Candidate], out: &mut W) -> io::Result<Vec<Report>> {
        writeln!(out, "{}\n", self.header())?;

        let mut reports = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let report = self.build_and_time(candidate, |runs| {
                if !candidate.is_slow() {
                    return Ok(());
                }
                writeln!(
                    out,
                    "{:NAME_WIDTH$} (running {runs} iteration{} - slow)",
                    label(candidate.name()),
                    if runs == 1 { "" } else { "s" }
                )
            })?;
            writeln!(out, "{}", format_outcome(&report))?;
            out.flush()?;
            reports.push(report);
        }

        Ok(reports)
    }

    /// Build `candidate`, call `before_timing` with the run count, then time it.
    ///
    /// `before_timing` only runs when the build succeeded; its error aborts
    /// without timing.
    fn build_and_time<E>(
        &self,
        candidate: &Candidate,
        before_timing: impl FnOnce(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<Report, E> {
        let outcome = match (candidate.build)(self.config) {
            Ok(chunker) => {
                let runs = self.runs_for(candidate);
                before_timing(runs)?;
                self.outcome_of(candidate, chunker.as_ref(), runs)
            }
            Err(err) => Self::failed(candidate, &err),
        };
        Ok(Report {
            name: candidate.name().to_string(),
            outcome,
        })
    }

    fn outcome_of(&self, candidate: &Candidate, chunker: &dyn Chunker, runs: usize) -> Outcome {
        info!(candidate = candidate.name(), runs, "timing candidate");
        match self.time(chunker, runs) {
            Ok(m) => {
                info!(
                    candidate = candidate.name(),
                    mean_ms = m.mean_ms(),
                    mb_per_sec = m.mb_per_sec(),
                    "candidate measured"
                );
                Outcome::Measured(m)
            }
            Err(err) => Self::failed(candidate, &err),
        }
    }

    fn failed(candidate: &Candidate, err: &Error) -> Outcome {
        if matches!(err, Error::NotInstalled) {
            info!(candidate = candidate.name(), "candidate not installed");
            Outcome::NotInstalled
        } else {
            warn!(candidate = candidate.name(), error = %err, "candidate failed");
            Outcome::Errored(err.to_string())
        }
    }
}
