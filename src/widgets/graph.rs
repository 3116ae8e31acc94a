use crate::data::history::fit_to_width;
use crossterm::style::Color;
use ratatui::symbols::{bar, braille};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ansi::paint;

const ASCII_RAMP: [&str; 8] = [" ", ".", "_", "-", "=", "+", "#", "@"];

/// Glyph family used to rasterize a history series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GraphStyle {
    /// 2x4 dots per cell.
    #[default]
    Braille,
    /// Eighth blocks, one sample per cell.
    Block,
    /// Seven-level ASCII ramp for terminals without Unicode.
    Ascii,
}

impl fmt::Display for GraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphStyle::Braille => "braille",
            GraphStyle::Block => "block",
            GraphStyle::Ascii => "ascii",
        })
    }
}

impl FromStr for GraphStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "braille" => Ok(GraphStyle::Braille),
            "block" => Ok(GraphStyle::Block),
            "ascii" => Ok(GraphStyle::Ascii),
            other => Err(format!("unknown graph style '{other}'")),
        }
    }
}

/// Geometry and value range of one graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphArea {
    pub width: usize,
    pub height: usize,
    pub min: f64,
    pub max: f64,
}

impl GraphArea {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            min: 0.0,
            max: 100.0,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Number of filled levels out of `levels` for `value`.
    fn fill(&self, value: f64, levels: usize) -> usize {
        let span = if self.max == self.min {
            1.0
        } else {
            self.max - self.min
        };
        let value = if value.is_nan() {
            self.min
        } else {
            value.max(self.min).min(self.max)
        };
        let norm = (value - self.min) / span;
        let scaled = (norm * levels as f64).floor();
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(levels)
        }
    }
}

/// Collects glyphs into color runs so a row carries one escape pair per run.
struct RowBuilder {
    out: String,
    run: String,
    color: Option<Color>,
}

impl RowBuilder {
    fn new() -> Self {
        Self {
            out: String::new(),
            run: String::new(),
            color: None,
        }
    }

    fn push(&mut self, glyph: &str, color: Color) {
        if self.color != Some(color) {
            self.flush();
            self.color = Some(color);
        }
        self.run.push_str(glyph);
    }

    fn flush(&mut self) {
        if let Some(color) = self.color {
            if !self.run.is_empty() {
                self.out.push_str(&paint(&self.run, color));
            }
        }
        self.run.clear();
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}

fn braille_glyph(bits: u16) -> String {
    char::from_u32(u32::from(braille::BLANK | bits))
        .unwrap_or(' ')
        .to_string()
}

/// Dot bits of one braille column `dx` holding `fill` dots counted from the
/// bottom of the whole graph, restricted to cell row `row`.
fn braille_column_bits(fill: usize, row: usize, height: usize, dx: usize) -> u16 {
    let dots_h = height * 4;
    let mut bits = 0;
    for dy in 0..4 {
        let y = row * 4 + dy;
        if dots_h - 1 - y < fill {
            bits |= braille::DOTS[dy][dx];
        }
    }
    bits
}

fn ramp_for(style: GraphStyle) -> Vec<&'static str> {
    match style {
        GraphStyle::Ascii => ASCII_RAMP.to_vec(),
        _ => {
            let set = bar::NINE_LEVELS;
            vec![
                set.empty,
                set.one_eighth,
                set.one_quarter,
                set.three_eighths,
                set.half,
                set.five_eighths,
                set.three_quarters,
                set.seven_eighths,
                set.full,
            ]
        }
    }
}

fn ramp_glyph<'a>(ramp: &[&'a str], fill: usize, row: usize, height: usize) -> &'a str {
    let per_row = ramp.len() - 1;
    let bottom = (height - 1 - row) * per_row;
    let top = bottom + per_row;
    if fill >= top {
        ramp[per_row]
    } else if fill <= bottom {
        ramp[0]
    } else {
        ramp[fill - bottom]
    }
}

impl GraphStyle {
    pub const ALL: [GraphStyle; 3] = [GraphStyle::Braille, GraphStyle::Block, GraphStyle::Ascii];

    /// Samples one row of `width` cells can show.
    pub fn sub_columns(self, width: usize) -> usize {
        match self {
            GraphStyle::Braille => width * 2,
            GraphStyle::Block | GraphStyle::Ascii => width,
        }
    }

    /// Rasterize `samples` into exactly `area.height` lines of `area.width`
    /// visible columns. The newest sample sits in the rightmost column.
    pub fn render(self, samples: &[f64], area: GraphArea, fill: Color, empty: Color) -> Vec<String> {
        if area.height == 0 {
            return Vec::new();
        }
        if area.width == 0 {
            return vec![String::new(); area.height];
        }

        match self {
            GraphStyle::Braille => {
                let data = fit_to_width(samples, area.width * 2);
                let fills: Vec<usize> = data.iter().map(|v| area.fill(*v, area.height * 4)).collect();
                (0..area.height)
                    .map(|row| {
                        let mut line = RowBuilder::new();
                        for col in 0..area.width {
                            let bits = braille_column_bits(fills[col * 2], row, area.height, 0)
                                | braille_column_bits(fills[col * 2 + 1], row, area.height, 1);
                            let color = if bits == 0 { empty } else { fill };
                            line.push(&braille_glyph(bits), color);
                        }
                        line.finish()
                    })
                    .collect()
            }
            GraphStyle::Block | GraphStyle::Ascii => {
                let ramp = ramp_for(self);
                let levels = area.height * (ramp.len() - 1);
                let data = fit_to_width(samples, area.width);
                let fills: Vec<usize> = data.iter().map(|v| area.fill(*v, levels)).collect();
                (0..area.height)
                    .map(|row| {
                        let mut line = RowBuilder::new();
                        for &f in &fills {
                            let glyph = ramp_glyph(&ramp, f, row, area.height);
                            let color = if glyph == " " { empty } else { fill };
                            line.push(glyph, color);
                        }
                        line.finish()
                    })
                    .collect()
            }
        }
    }

    /// Overlay two series on one graph.
    ///
    /// Braille draws `a` in the left dot column and `b` in the right one,
    /// one sample of each per cell; a cell holding both takes `a`'s color.
    /// Block and ASCII draw the taller of the two per column in that
    /// series' color, `a` winning ties.
    pub fn render_dual(
        self,
        a: &[f64],
        b: &[f64],
        area: GraphArea,
        color_a: Color,
        color_b: Color,
        empty: Color,
    ) -> Vec<String> {
        if area.height == 0 {
            return Vec::new();
        }
        if area.width == 0 {
            return vec![String::new(); area.height];
        }

        let levels = match self {
            GraphStyle::Braille => area.height * 4,
            _ => area.height * (ramp_for(self).len() - 1),
        };
        let fills_a: Vec<usize> = fit_to_width(a, area.width)
            .iter()
            .map(|v| area.fill(*v, levels))
            .collect();
        let fills_b: Vec<usize> = fit_to_width(b, area.width)
            .iter()
            .map(|v| area.fill(*v, levels))
            .collect();

        match self {
            GraphStyle::Braille => (0..area.height)
                .map(|row| {
                    let mut line = RowBuilder::new();
                    for col in 0..area.width {
                        let bits_a = braille_column_bits(fills_a[col], row, area.height, 0);
                        let bits_b = braille_column_bits(fills_b[col], row, area.height, 1);
                        let color = if bits_a != 0 {
                            color_a
                        } else if bits_b != 0 {
                            color_b
                        } else {
                            empty
                        };
                        line.push(&braille_glyph(bits_a | bits_b), color);
                    }
                    line.finish()
                })
                .collect(),
            GraphStyle::Block | GraphStyle::Ascii => {
                let ramp = ramp_for(self);
                (0..area.height)
                    .map(|row| {
                        let mut line = RowBuilder::new();
                        for (fa, fb) in fills_a.iter().zip(&fills_b) {
                            let (f, series_color) = if fa >= fb {
                                (*fa, color_a)
                            } else {
                                (*fb, color_b)
                            };
                            let glyph = ramp_glyph(&ramp, f, row, area.height);
                            let color = if glyph == " " { empty } else { series_color };
                            line.push(glyph, color);
                        }
                        line.finish()
                    })
                    .collect()
            }
        }
    }
}

/// Single-row block graph, newest sample rightmost.
pub fn sparkline(samples: &[f64], width: usize, min: f64, max: f64, color: Color) -> String {
    let area = GraphArea::new(width, 1).range(min, max);
    let ramp = ramp_for(GraphStyle::Block);
    let mut line = String::new();
    for v in fit_to_width(samples, width) {
        let glyph = ramp[area.fill(v, ramp.len() - 1)];
        if glyph == " " {
            line.push(' ');
        } else {
            line.push_str(&paint(glyph, color));
        }
    }
    line
}
