use super::ansi::StyledLine;
use crate::theme::Theme;
use crossterm::style::Color;

/// General usage thresholds: below `USAGE_MID` is low, from `USAGE_HIGH` is high.
pub const USAGE_MID: f64 = 50.0;
pub const USAGE_HIGH: f64 = 80.0;

/// Process list heat thresholds. Per-process numbers sit much lower than
/// whole-machine ones, so the scale is tighter.
pub const HEAT_MID: f64 = 25.0;
pub const HEAT_HIGH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGlyphs {
    pub filled: &'static str,
    pub empty: &'static str,
}

pub const UNICODE_BAR: BarGlyphs = BarGlyphs {
    filled: "█",
    empty: "░",
};

pub const ASCII_BAR: BarGlyphs = BarGlyphs {
    filled: "#",
    empty: "-",
};

fn tiered(theme: &Theme, value: f64, mid: f64, high: f64) -> Color {
    if value >= high {
        theme.high
    } else if value >= mid {
        theme.mid
    } else {
        theme.low
    }
}

pub fn usage_color(theme: &Theme, percent: f64) -> Color {
    tiered(theme, percent, USAGE_MID, USAGE_HIGH)
}

pub fn heat_color(theme: &Theme, percent: f64) -> Color {
    tiered(theme, percent, HEAT_MID, HEAT_HIGH)
}

fn filled_cells(percent: f64, width: usize) -> usize {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    ((width as f64 * percent / 100.0).floor() as usize).min(width)
}

/// `width` cells, filled share colored by usage, remainder dimmed.
pub fn usage_bar(theme: &Theme, percent: f64, width: usize, glyphs: BarGlyphs) -> StyledLine {
    let filled = filled_cells(percent, width);
    let mut line = StyledLine::new();
    line.push(&glyphs.filled.repeat(filled), usage_color(theme, percent));
    line.push(&glyphs.empty.repeat(width - filled), theme.graph_empty);
    line
}

/// `Label  [bar] value`, the label padded to six columns.
pub fn labeled_bar(
    theme: &Theme,
    label: &str,
    percent: f64,
    bar_width: usize,
    value: &str,
    glyphs: BarGlyphs,
) -> StyledLine {
    let mut line = StyledLine::new();
    line.push(&format!("{:<6}", label), theme.label);
    line.push_plain(" [");
    line.push_raw(usage_bar(theme, percent, bar_width, glyphs).as_str());
    line.push_plain("] ");
    line.push(value, theme.value);
    line
}

/// Core number followed by up to five blocks, one per 20%.
pub fn core_indicator(theme: &Theme, index: usize, percent: f64, glyphs: BarGlyphs) -> StyledLine {
    let blocks = filled_cells(percent, 5);
    let mut line = StyledLine::new();
    line.push(&index.to_string(), theme.label);
    line.push(&glyphs.filled.repeat(blocks), usage_color(theme, percent));
    line.push_plain(&" ".repeat(5 - blocks));
    line
}
