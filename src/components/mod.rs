use crate::{
    data::{history::SystemHistory, snapshot::SystemSnapshot},
    theme::Theme,
    widgets::{
        ansi::{visible_len, StyledLine},
        bar::{labeled_bar, usage_color, BarGlyphs, ASCII_BAR, UNICODE_BAR},
        boxes::{BoxFrame, ASCII},
        graph::{GraphArea, GraphStyle},
    },
};
use crossterm::style::Color;
use ratatui::symbols::line;

pub mod cpu;
pub mod disk;
pub mod gpu;
pub mod help;
pub mod memory;
pub mod network;
pub mod process;

pub use cpu::CpuPanel;
pub use disk::DiskPanel;
pub use gpu::GpuPanel;
pub use help::HelpPanel;
pub use memory::MemoryPanel;
pub use network::NetworkPanel;
pub use process::{ProcessPanel, ProcessRender};

/// A dashboard panel: one bordered block of lines per frame.
pub trait Component {
    /// Render the panel. Every line is `ctx.style.width` visible columns
    /// unless content overflows.
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String>;
}

/// Display configuration shared by the metric panels for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub width: usize,
    pub graph_height: usize,
    pub graph_style: GraphStyle,
    pub show_graphs: bool,
    /// Rounded borders and block bars; ASCII otherwise.
    pub unicode: bool,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            width: 42,
            graph_height: 5,
            graph_style: GraphStyle::Braille,
            show_graphs: true,
            unicode: true,
        }
    }
}

impl PanelStyle {
    pub fn with_graph_height(mut self, height: usize) -> Self {
        self.graph_height = height;
        self
    }

    pub fn frame(&self, theme: &Theme, title: Color) -> BoxFrame {
        let set = if self.unicode { line::ROUNDED } else { ASCII };
        BoxFrame::new(self.width)
            .with_set(set)
            .with_colors(theme.border, title)
    }

    pub fn bar_glyphs(&self) -> BarGlyphs {
        if self.unicode {
            UNICODE_BAR
        } else {
            ASCII_BAR
        }
    }

    /// Columns available between `│ ` and `│`.
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(3)
    }

    pub fn graph_width(&self) -> usize {
        self.width.saturating_sub(4)
    }

    pub fn graphs_visible(&self) -> bool {
        self.show_graphs && self.graph_height > 0 && self.graph_width() > 0
    }
}

/// Everything a panel may read while drawing.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub snapshot: &'a SystemSnapshot,
    pub history: &'a SystemHistory,
    pub theme: &'a Theme,
    pub style: PanelStyle,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        snapshot: &'a SystemSnapshot,
        history: &'a SystemHistory,
        theme: &'a Theme,
        style: PanelStyle,
    ) -> Self {
        Self {
            snapshot,
            history,
            theme,
            style,
        }
    }

    pub fn with_style(self, style: PanelStyle) -> Self {
        Self { style, ..self }
    }

    /// Single-series graph over `[0, 100]`, framed as box lines and colored
    /// by the usage tier of the newest sample.
    fn percent_graph(&self, frame: &BoxFrame, samples: &[f64]) -> Vec<String> {
        let area = GraphArea::new(self.style.graph_width(), self.style.graph_height);
        let fill = samples
            .last()
            .map_or(self.theme.graph_fill, |latest| usage_color(self.theme, *latest));
        self.style
            .graph_style
            .render(samples, area, fill, self.theme.graph_empty)
            .iter()
            .map(|row| frame.line(row))
            .collect()
    }

    /// Two rate series sharing one autoscaled range that never drops below `floor`.
    fn rate_graph(&self, frame: &BoxFrame, a: &[f64], b: &[f64], floor: f64) -> Vec<String> {
        let peak = a.iter().chain(b).copied().fold(floor, f64::max);
        let area = GraphArea::new(self.style.graph_width(), self.style.graph_height).range(0.0, peak);
        self.style
            .graph_style
            .render_dual(a, b, area, self.theme.low, self.theme.accent, self.theme.graph_empty)
            .iter()
            .map(|row| frame.line(row))
            .collect()
    }

    /// `Label  [bar] value` with the bar stretched so a value of
    /// `value_width` columns ends one column short of the right border,
    /// like graph rows.
    fn meter(&self, label: &str, percent: f64, value: &str, value_width: usize) -> StyledLine {
        let bar_width = self
            .style
            .content_width()
            .saturating_sub(11 + value_width.max(visible_len(value)));
        labeled_bar(
            self.theme,
            label,
            percent,
            bar_width,
            value,
            self.style.bar_glyphs(),
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::data::snapshot::*;

    pub fn sample_snapshot() -> SystemSnapshot {
        SystemSnapshot {
            cpu: CpuSnapshot {
                usage_percent: 42.5,
                per_core: vec![10.0, 55.0, 85.0, 20.0, 0.0, 100.0],
                freq_mhz: 3200.0,
                core_count: 4,
                thread_count: 6,
                model: "Test CPU 9000".into(),
            },
            memory: MemorySnapshot {
                used_gb: 8.0,
                total_gb: 16.0,
                available_gb: 8.0,
                percent: 50.0,
                swap_used_gb: 1.0,
                swap_total_gb: 4.0,
                swap_percent: 25.0,
            },
            disks: vec![
                DiskUsage {
                    mount: "/".into(),
                    used_gb: 100.0,
                    total_gb: 200.0,
                    percent: 50.0,
                },
                DiskUsage {
                    mount: "/very/long/mount/point".into(),
                    used_gb: 90.0,
                    total_gb: 100.0,
                    percent: 90.0,
                },
            ],
            disk_io: DiskIoCounters::default(),
            network: NetworkSnapshot {
                hostname: "testhost".into(),
                interface_ips: [("eth0".to_string(), "10.0.0.2".to_string())]
                    .into_iter()
                    .collect(),
                bytes_sent: 2048,
                bytes_recv: 3 * 1024 * 1024,
            },
            gpu: GpuSnapshot {
                name: "Test GPU".into(),
                usage_percent: Some(30.0),
                vram_used_mb: Some(2048.0),
                vram_total_mb: Some(8192.0),
                temp_c: Some(65.0),
            },
            processes: (1..=12)
                .map(|pid| ProcessSnapshot {
                    pid,
                    ppid: if pid == 1 { 0 } else { 1 },
                    name: format!("proc{pid}"),
                    user: "root".into(),
                    cpu_percent: pid as f64 * 5.0,
                    mem_percent: 1.0,
                    status: "Run".into(),
                })
                .collect(),
            system: SystemInfo {
                os: "Linux".into(),
                uptime_secs: Some(3_700),
                load_avg: Some([0.5, 0.25, 0.1]),
            },
        }
    }
}
