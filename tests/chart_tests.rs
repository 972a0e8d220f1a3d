//! Rendering tests for the throughput chart.

use chunkmark::{Chart, ChartConfig, ChartEntry};

fn config_in(dir: &tempfile::TempDir) -> ChartConfig {
    ChartConfig {
        out_dir: dir.path().to_path_buf(),
        ..ChartConfig::default()
    }
}

/// Width and height from the PNG IHDR chunk.
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
    (width, height)
}

/// `y` attribute of every bar `<rect>`, in document order.
fn bar_ys(svg: &str) -> Vec<f32> {
    svg.lines()
        .filter(|l| l.trim_start().starts_with("<rect x="))
        .map(|l| {
            let rest = &l[l.find(" y=\"").unwrap() + 4..];
            rest[..rest.find('"').unwrap()].parse().unwrap()
        })
        .collect()
}

#[test]
fn save_writes_png_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let [png_path, svg_path] = Chart::default().save(&config).unwrap();

    assert_eq!(png_path, dir.path().join("benchmark.png"));
    assert_eq!(svg_path, dir.path().join("benchmark.svg"));

    let png = std::fs::read(&png_path).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    // 10 x 4.5 inches at 150 dpi
    assert_eq!(png_dimensions(&png), (1500, 675));

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Chunking speed</text>"));
    assert!(svg.contains(">36x slower</text>"));
    assert!(svg.contains(">96471x slower</text>"));
}

#[test]
fn save_overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(dir.path().join("benchmark.svg"), "stale").unwrap();

    Chart::default().save(&config).unwrap();

    let svg = std::fs::read_to_string(dir.path().join("benchmark.svg")).unwrap();
    assert_ne!(svg, "stale");
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = ChartConfig {
        out_dir: dir.path().join("does/not/exist"),
        ..ChartConfig::default()
    };

    assert!(Chart::default().save(&config).is_err());
}

#[test]
fn fastest_bar_is_drawn_first_and_widest() {
    let chart = Chart::new([
        ChartEntry::new("slow", 1.0),
        ChartEntry::new("fast", 10.0),
        ChartEntry::new("middle", 5.0),
    ]);
    let svg = chart.to_svg(&ChartConfig::default());

    // bars are stacked top to bottom in descending speed
    let ys = bar_ys(&svg);
    assert_eq!(ys.len(), 3);
    assert!(ys.windows(2).all(|w| w[0] < w[1]));

    let fast = svg.find(">fast</text>").unwrap();
    let middle = svg.find(">middle</text>").unwrap();
    let slow = svg.find(">slow</text>").unwrap();
    assert!(fast < middle && middle < slow);

    assert!(svg.contains(">2x slower</text>"));
    assert!(svg.contains(">10x slower</text>"));
    assert!(!svg.contains(">1x slower</text>"));
}

#[test]
fn labels_are_escaped() {
    let chart = Chart::new([ChartEntry::new("a<b & c", 1.0)]);
    let svg = chart.to_svg(&ChartConfig::default());
    assert!(svg.contains(">a&lt;b &amp; c</text>"));

    let png = chart.to_png(&ChartConfig::default()).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn dpi_scales_png_only() {
    let config = ChartConfig {
        dpi: 100.0,
        ..ChartConfig::default()
    };
    let png = Chart::default().to_png(&config).unwrap();
    assert_eq!(png_dimensions(&png), (1000, 450));
}
