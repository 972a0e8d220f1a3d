//! Runner and renderer configuration.
//!
//! Defaults reproduce a run with no flags: enwik8 from `benches/data`, 4KB
//! chunks, five timed runs, and the chart written to the working directory.

use std::path::PathBuf;

use crate::delimiter::DEFAULT_TARGET_SIZE;

/// Benchmark runner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Corpus file, read once.
    pub corpus_path: PathBuf,
    /// Target chunk size handed to every candidate, in bytes.
    pub chunk_size: usize,
    /// Timed runs per regular candidate.
    pub runs: usize,
    /// Timed runs per slow candidate.
    pub slow_runs: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("benches/data/enwik8"),
            chunk_size: DEFAULT_TARGET_SIZE,
            runs: 5,
            slow_runs: 1,
        }
    }
}

/// Chart renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Directory receiving `benchmark.png` and `benchmark.svg`.
    pub out_dir: PathBuf,
    /// Figure size in inches, `(width, height)`.
    pub figure_inches: (f32, f32),
    /// Raster resolution of the PNG.
    pub dpi: f32,
    /// Chart title.
    pub title: String,
    /// Footnote in the bottom-right corner.
    pub subtitle: String,
}

impl ChartConfig {
    /// Pixels per inch of the SVG user space.
    pub const SVG_DPI: f32 = 100.0;

    /// SVG canvas size in pixels.
    #[must_use]
    pub fn canvas(&self) -> (f32, f32) {
        (
            self.figure_inches.0 * Self::SVG_DPI,
            self.figure_inches.1 * Self::SVG_DPI,
        )
    }

    /// Scale applied when rasterising the SVG.
    #[must_use]
    pub fn png_scale(&self) -> f32 {
        self.dpi / Self::SVG_DPI
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            figure_inches: (10.0, 4.5),
            dpi: 150.0,
            title: "Chunking speed".to_string(),
            subtitle: "Speed in GB/s, enwik8 100MB, 4KB chunks, Apple M3".to_string(),
        }
    }
}
