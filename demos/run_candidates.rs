//! Run the Candidate Line-up
//!
//! Times every built-in chunker over an in-memory corpus, without needing
//! enwik8 on disk.
//!
//! ```bash
//! cargo run --release --example run_candidates
//! ```

use std::io;

use chunkmark::{default_candidates, BenchConfig, Corpus, Outcome, Runner};

fn main() -> io::Result<()> {
    let paragraph = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions?\n\
        Deep learning extends this with multiple hidden layers.\n\n";
    let corpus = Corpus::from_text("synthetic", paragraph.repeat(20_000));

    // Smaller chunks and fewer runs than the real benchmark.
    let config = BenchConfig {
        chunk_size: 1024,
        runs: 3,
        ..BenchConfig::default()
    };

    let runner = Runner::new(&corpus, &config);
    let reports = runner.run_all(&default_candidates(), &mut io::stdout().lock())?;

    let fastest = reports
        .iter()
        .filter_map(|r| match &r.outcome {
            Outcome::Measured(m) => Some((r.name.as_str(), m.mb_per_sec())),
            _ => None,
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((name, mb_per_sec)) = fastest {
        println!("\nFastest: {name} at {mb_per_sec:.1} MB/s");
    }
    Ok(())
}
