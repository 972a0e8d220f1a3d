//! Render the chunking speed chart as `benchmark.png` and `benchmark.svg`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chunkmark::{init_logging, Chart, ChartConfig};

#[derive(Parser, Debug)]
#[command(
    name = "chunkmark-chart",
    about = "Render the chunking speed bar chart."
)]
struct Args {
    /// Directory receiving benchmark.png and benchmark.svg
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Log level written to stderr
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level).context("failed to install log subscriber")?;

    let config = ChartConfig {
        out_dir: args.out_dir,
        ..ChartConfig::default()
    };
    Chart::default()
        .save(&config)
        .with_context(|| format!("failed to write chart to {}", config.out_dir.display()))?;

    println!("Saved benchmark.png and benchmark.svg");
    Ok(())
}
