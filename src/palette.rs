//! Flexoki light-theme colours used by the chart.

pub(crate) const BLACK: &str = "#100F0F";
pub(crate) const BASE_800: &str = "#403E3C";
pub(crate) const BASE_600: &str = "#6F6E69";
pub(crate) const BASE_500: &str = "#878580";
pub(crate) const BASE_300: &str = "#B7B5AC";
pub(crate) const PAPER: &str = "#FFFCF0";
pub(crate) const GREEN_400: &str = "#879A39";

/// Bar colour for the fastest entry.
pub(crate) const HIGHLIGHT: &str = GREEN_400;

/// Bar colour for every other entry.
pub(crate) const MUTED: &str = BASE_300;
