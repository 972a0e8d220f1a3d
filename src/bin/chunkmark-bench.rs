//! Time every chunking candidate over one corpus.
//!
//! ```bash
//! cargo run --release --bin chunkmark-bench
//! cargo run --release --features text-splitter --bin chunkmark-bench -- --runs 10
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use chunkmark::{default_candidates, init_logging, BenchConfig, Corpus, Outcome, Runner};

#[derive(Parser, Debug)]
#[command(
    name = "chunkmark-bench",
    about = "Benchmark text chunking throughput over a fixed corpus."
)]
struct Args {
    /// Corpus file, read once
    #[arg(long, default_value = "benches/data/enwik8")]
    corpus: PathBuf,

    /// Target chunk size in bytes
    #[arg(long, default_value_t = 4096)]
    chunk_size: usize,

    /// Timed runs per candidate (slow candidates always get one)
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Log level written to stderr
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level).context("failed to install log subscriber")?;

    let config = BenchConfig {
        corpus_path: args.corpus,
        chunk_size: args.chunk_size,
        runs: args.runs,
        ..BenchConfig::default()
    };

    let corpus = Corpus::load(&config.corpus_path)
        .with_context(|| format!("cannot load corpus {}", config.corpus_path.display()))?;

    let runner = Runner::new(&corpus, &config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = runner
        .run_all(&default_candidates(), &mut out)
        .context("failed to write results")?;
    out.flush()?;

    let measured = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Measured(_)))
        .count();
    info!(measured, total = reports.len(), "benchmark finished");
    Ok(())
}
