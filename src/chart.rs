//! Horizontal bar chart of chunking throughput.
//!
//! ```text
//!         Chunking speed
//!
//!      memchunk ████████████████████████████████
//!          kiru █  36x slower
//!     langchain ▏  469x slower
//!           ... ▏  ...
//!               └──────┬──────┬──────┬──────
//!               0     50    100    150   GB/s
//! ```
//!
//! Entries are sorted fastest first. The fastest bar is highlighted; every
//! other bar carries its slowdown relative to the fastest, `fastest / speed`
//! rounded to the nearest integer with ties to even. The chart is drawn as
//! SVG and rasterised to PNG with resvg.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use resvg::{tiny_skia, usvg};
use tracing::info;

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::palette;

/// Measured throughput in GB/s (4KB chunks, enwik8 100MB).
///
/// Transcribed by hand from benchmark runs.
pub const DEFAULT_ENTRIES: [(&str, f64); 6] = [
    ("memchunk", 164.0),
    ("kiru", 4.5),
    ("langchain", 0.35),
    ("semchunk", 0.013),
    ("llama-index", 0.0035),
    ("text-splitter", 0.0017),
];

/// Points to SVG pixels at 100 px/inch.
const PX_PER_PT: f32 = 100.0 / 72.0;

/// One row of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Bar label.
    pub label: String,
    /// Throughput in GB/s.
    pub gb_per_sec: f64,
}

impl ChartEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(label: impl Into<String>, gb_per_sec: f64) -> Self {
        Self {
            label: label.into(),
            gb_per_sec,
        }
    }
}

/// A bar ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// Bar label.
    pub label: String,
    /// Throughput in GB/s.
    pub gb_per_sec: f64,
    /// Fill colour.
    pub color: &'static str,
    /// `fastest / gb_per_sec` rounded half to even; `None` for the fastest bar.
    pub slowdown: Option<u64>,
}

impl ChartBar {
    /// The text drawn next to the bar.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        self.slowdown.map(|n| format!("{n}x slower"))
    }
}

/// A bar chart, entries sorted by descending speed.
///
/// ```rust
/// use chunkmark::{Chart, ChartEntry};
///
/// let chart = Chart::new([ChartEntry::new("slow", 2.0), ChartEntry::new("fast", 10.0)]);
/// let bars = chart.bars();
///
/// assert_eq!(bars[0].label, "fast");
/// assert_eq!(bars[1].annotation().as_deref(), Some("5x slower"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    entries: Vec<ChartEntry>,
}

impl Chart {
    /// Build a chart, sorting entries fastest first.
    pub fn new(entries: impl IntoIterator<Item = ChartEntry>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.gb_per_sec.total_cmp(&a.gb_per_sec));
        Self { entries }
    }

    /// Entries in drawing order.
    #[must_use]
    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    /// The fastest entry.
    #[must_use]
    pub fn fastest(&self) -> Option<&ChartEntry> {
        self.entries.first()
    }

    /// Bars in drawing order, with colours and slowdown factors.
    #[must_use]
    pub fn bars(&self) -> Vec<ChartBar> {
        let Some(fastest) = self.fastest().map(|e| e.gb_per_sec) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| ChartBar {
                label: entry.label.clone(),
                gb_per_sec: entry.gb_per_sec,
                color: if i == 0 { palette::HIGHLIGHT } else { palette::MUTED },
                slowdown: (i > 0).then(|| (fastest / entry.gb_per_sec).round_ties_even() as u64),
            })
            .collect()
    }

    /// Render as an SVG document.
    #[must_use]
    pub fn to_svg(&self, config: &ChartConfig) -> String {
        let mut svg = String::new();
        self.write_svg(&mut svg, config)
            .expect("writing to a String cannot fail");
        svg
    }

    /// Render as PNG bytes at `config.dpi`.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] if the SVG cannot be parsed or encoded.
    pub fn to_png(&self, config: &ChartConfig) -> Result<Vec<u8>> {
        rasterize(&self.to_svg(config), config.png_scale())
    }

    /// Write `benchmark.png` and `benchmark.svg` into `config.out_dir`.
    ///
    /// Returns the paths written, PNG first.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] on rasterisation failure, [`Error::Io`] on write
    /// failure.
    pub fn save(&self, config: &ChartConfig) -> Result<[PathBuf; 2]> {
        let svg = self.to_svg(config);
        let png = rasterize(&svg, config.png_scale())?;

        let png_path = config.out_dir.join("benchmark.png");
        let svg_path = config.out_dir.join("benchmark.svg");
        std::fs::write(&png_path, &png)?;
        std::fs::write(&svg_path, &svg)?;

        info!(
            png = %png_path.display(),
            svg = %svg_path.display(),
            png_bytes = png.len(),
            "chart written"
        );
        Ok([png_path, svg_path])
    }

    fn write_svg(&self, svg: &mut String, config: &ChartConfig) -> std::fmt::Result {
        let (width, height) = config.canvas();
        let layout = Layout::new(width, height);
        let bars = self.bars();
        let fastest = bars.first().map_or(1.0, |b| b.gb_per_sec);
        let axis = Axis::new(fastest);

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="DejaVu Sans, Helvetica, Arial, sans-serif">"#
        )?;
        writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, palette::PAPER)?;

        writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="{:.1}" font-weight="bold" fill="{}">{}</text>"#,
            (layout.left + layout.right) / 2.0,
            layout.top - 28.0,
            18.0 * PX_PER_PT,
            palette::BLACK,
            escape(&config.title)
        )?;

        let band = layout.plot_height() / bars.len().max(1) as f32;
        for (i, bar) in bars.iter().enumerate() {
            let center = layout.top + band * (i as f32 + 0.5);
            let bar_height = band * 0.5;
            let bar_width = layout.x(&axis, bar.gb_per_sec) - layout.left;

            writeln!(
                svg,
                r#"  <rect x="{:.1}" y="{:.1}" width="{:.2}" height="{:.1}" fill="{}"/>"#,
                layout.left,
                center - bar_height / 2.0,
                bar_width.max(0.0),
                bar_height,
                bar.color
            )?;
            writeln!(
                svg,
                r#"  <text x="{:.1}" y="{center:.1}" text-anchor="end" dominant-baseline="central" font-size="{:.1}" font-weight="500" fill="{}">{}</text>"#,
                layout.left - 10.0,
                14.0 * PX_PER_PT,
                palette::BASE_800,
                escape(&bar.label)
            )?;
            if let Some(annotation) = bar.annotation() {
                writeln!(
                    svg,
                    r#"  <text x="{:.1}" y="{center:.1}" dominant-baseline="central" font-size="{:.1}" fill="{}">{annotation}</text>"#,
                    layout.x(&axis, bar.gb_per_sec + fastest * 0.02),
                    11.0 * PX_PER_PT,
                    palette::BASE_600
                )?;
            }
        }

        // Left and bottom spines only.
        writeln!(
            svg,
            r#"  <path d="M{l:.1},{t:.1} V{b:.1} H{r:.1}" fill="none" stroke="{}" stroke-width="1"/>"#,
            palette::BASE_600,
            l = layout.left,
            t = layout.top,
            b = layout.bottom,
            r = layout.right
        )?;

        for tick in axis.ticks() {
            let x = layout.x(&axis, tick);
            writeln!(
                svg,
                r#"  <line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{}"/>"#,
                layout.bottom,
                layout.bottom + 5.0,
                palette::BASE_600
            )?;
            writeln!(
                svg,
                r#"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="{:.1}" fill="{}">{}</text>"#,
                layout.bottom + 20.0,
                10.0 * PX_PER_PT,
                palette::BASE_600,
                axis.label(tick)
            )?;
        }

        writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="{:.1}" fill="{}">GB/s</text>"#,
            (layout.left + layout.right) / 2.0,
            layout.bottom + 42.0,
            12.0 * PX_PER_PT,
            palette::BASE_600
        )?;
        writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="{:.1}" font-style="italic" fill="{}">{}</text>"#,
            width * 0.95,
            height * 0.98,
            9.0 * PX_PER_PT,
            palette::BASE_500,
            escape(&config.subtitle)
        )?;

        writeln!(svg, "</svg>")
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRIES
                .iter()
                .map(|&(label, speed)| ChartEntry::new(label, speed)),
        )
    }
}

/// Plot area inside the canvas.
struct Layout {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Layout {
    fn new(width: f32, height: f32) -> Self {
        Self {
            left: width * 0.15,
            right: width * 0.94,
            top: height * 0.155,
            bottom: height * 0.8,
        }
    }

    fn plot_height(&self) -> f32 {
        self.bottom - self.top
    }

    fn x(&self, axis: &Axis, value: f64) -> f32 {
        let frac = (value / axis.max) as f32;
        self.left + frac * (self.right - self.left)
    }
}

/// Linear x axis from zero with a 5% margin past the fastest bar.
struct Axis {
    max: f64,
    step: f64,
}

impl Axis {
    fn new(fastest: f64) -> Self {
        let max = if fastest.is_finite() && fastest > 0.0 {
            fastest * 1.05
        } else {
            1.0
        };
        Self {
            max,
            step: nice_step(max, 5.0),
        }
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0_u32..)
            .map(|i| f64::from(i) * self.step)
            .take_while(|&v| v <= self.max + self.step * 1e-9)
    }

    fn label(&self, value: f64) -> String {
        let mut decimals = (-self.step.log10().floor()).max(0.0) as usize;
        if (self.step * 10f64.powi(decimals as i32)).fract().abs() > 1e-9 {
            decimals += 1;
        }
        format!("{value:.decimals$}")
    }
}

/// Round `range / target` up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_step(range: f64, target: f64) -> f64 {
    let raw = range / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0]
        .into_iter()
        .find(|&n| normalized <= n + 1e-9)
        .unwrap_or(10.0);
    nice * magnitude
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rasterise an SVG document to PNG at `scale` times its pixel size.
fn rasterize(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let mut fonts = usvg::fontdb::Database::new();
    fonts.load_system_fonts();
    let options = usvg::Options {
        fontdb: Arc::new(fonts),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| Error::Render(e.to_string()))?;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| Error::Render(format!("cannot scale canvas by {scale}")))?;
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Render("empty canvas".to_string()))?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|e| Error::Render(e.to_string()))
}
