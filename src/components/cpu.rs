use super::{Component, RenderContext};
use crate::widgets::{
    ansi::{paint, truncate, StyledLine},
    bar::{core_indicator, usage_color},
    graph::sparkline,
};

/// Panels at least this wide add per-core history strips under the blocks.
const WIDE_PANEL: usize = 50;
const CORES_PER_ROW: usize = 4;

pub struct CpuPanel {
    pub max_cores: usize,
}

impl CpuPanel {
    pub fn new(max_cores: usize) -> Self {
        Self { max_cores }
    }

    fn core_blocks(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let glyphs = ctx.style.bar_glyphs();
        let cells: Vec<StyledLine> = ctx
            .snapshot
            .cpu
            .per_core
            .iter()
            .take(self.max_cores)
            .enumerate()
            .map(|(i, pct)| core_indicator(ctx.theme, i, *pct, glyphs))
            .collect();

        cells
            .chunks(CORES_PER_ROW)
            .map(|row| {
                let mut line = StyledLine::new();
                for (i, cell) in row.iter().enumerate() {
                    if i > 0 {
                        line.push_plain(" ");
                    }
                    line.push_raw(cell.as_str());
                }
                line.into_string()
            })
            .collect()
    }

    /// Two cores per line: index, sparkline of its history, current usage.
    fn core_strips(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let half = ctx.style.content_width().saturating_sub(1) / 2;
        let strip = half.saturating_sub(8);
        let cores = &ctx.snapshot.cpu.per_core;
        let shown = cores.len().min(self.max_cores);

        (0..shown)
            .step_by(2)
            .map(|first| {
                let mut line = StyledLine::new();
                for core in first..(first + 2).min(shown) {
                    if core > first {
                        line.push_plain(" ");
                    }
                    let pct = cores[core];
                    let history = ctx.history.core_graph_data(core, strip);
                    line.push(&format!("{:<2}", core), theme.label);
                    line.push_raw(&sparkline(&history, strip, 0.0, 100.0, usage_color(theme, pct)));
                    line.push(&format!(" {:>4.0}%", pct), theme.value);
                }
                line.into_string()
            })
            .collect()
    }
}

impl Component for CpuPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = ctx.style;
        let cpu = &ctx.snapshot.cpu;
        let frame = style.frame(theme, theme.cpu);
        let mut lines = vec![frame.top("CPU")];

        let model = if cpu.model.is_empty() {
            "Unknown CPU"
        } else {
            cpu.model.as_str()
        };
        lines.push(frame.line(&paint(
            &truncate(model, style.content_width()),
            theme.value,
        )));

        let mut info = StyledLine::new();
        info.push("Cores", theme.label)
            .push_plain(&format!(" {}  ", cpu.core_count))
            .push("Threads", theme.label)
            .push_plain(&format!(" {}  ", cpu.thread_count))
            .push("Freq", theme.label)
            .push_plain(&format!(" {:.0}MHz", cpu.freq_mhz));
        lines.push(frame.line(info.as_str()));
        lines.push(frame.separator());

        if style.graphs_visible() {
            let samples = ctx
                .history
                .cpu_graph_data(style.graph_style.sub_columns(style.graph_width()));
            lines.extend(ctx.percent_graph(&frame, &samples));
            lines.push(frame.separator());
        }

        let usage = format!("{:5.1}%", cpu.usage_percent);
        lines.push(frame.line(ctx.meter("Total", cpu.usage_percent, &usage, 6).as_str()));

        lines.extend(self.core_blocks(ctx).iter().map(|row| frame.line(row)));
        if style.width >= WIDE_PANEL && style.show_graphs {
            lines.push(frame.separator());
            lines.extend(self.core_strips(ctx).iter().map(|row| frame.line(row)));
        }

        lines.push(frame.bottom());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{testing::sample_snapshot, PanelStyle};
    use crate::data::history::SystemHistory;
    use crate::theme::Theme;
    use crate::widgets::ansi::{strip_ansi, visible_len};

    #[test]
    fn lines_keep_panel_width() {
        let snapshot = sample_snapshot();
        let mut history = SystemHistory::default();
        history.record(&snapshot);
        let theme = Theme::default();
        for width in [38, 42, 50] {
            let style = PanelStyle {
                width,
                ..PanelStyle::default()
            };
            let ctx = RenderContext::new(&snapshot, &history, &theme, style);
            for line in CpuPanel::new(8).render(&ctx) {
                assert_eq!(visible_len(&line), width, "{}", strip_ansi(&line));
            }
        }
    }

    #[test]
    fn core_rows_hold_four_cells() {
        let snapshot = sample_snapshot();
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            width: 42,
            show_graphs: false,
            ..PanelStyle::default()
        };
        let ctx = RenderContext::new(&snapshot, &history, &theme, style);
        let lines: Vec<String> = CpuPanel::new(5)
            .render(&ctx)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();
        // top, model, info, separator, total, two core rows, bottom
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("Test CPU 9000"));
        assert!(lines[2].contains("Cores 4  Threads 6  Freq 3200MHz"));
        assert!(lines[4].contains("Total  ["));
        assert!(lines[4].contains(" 42.5%"));
        assert!(lines[5].starts_with("│ 0"));
        assert!(lines[6].starts_with("│ 4 "));
    }

    #[test]
    fn graph_adds_rows_and_separator() {
        let snapshot = sample_snapshot();
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            width: 42,
            graph_height: 4,
            ..PanelStyle::default()
        };
        let ctx = RenderContext::new(&snapshot, &history, &theme, style);
        assert_eq!(CpuPanel::new(5).render(&ctx).len(), 8 + 4 + 1);
    }

    #[test]
    fn wide_panel_keeps_core_blocks() {
        let mut snapshot = sample_snapshot();
        snapshot.cpu.per_core = vec![60.0; 4];
        let mut history = SystemHistory::default();
        history.record(&snapshot);
        let theme = Theme::default();
        let style = PanelStyle {
            width: 50,
            graph_height: 4,
            ..PanelStyle::default()
        };
        let ctx = RenderContext::new(&snapshot, &history, &theme, style);
        let plain: Vec<String> = CpuPanel::new(8)
            .render(&ctx)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();
        let blocks = plain
            .iter()
            .position(|l| l.starts_with("│ 0███   1███"))
            .expect("block row");
        // separator, then two strip rows of two cores each
        assert!(plain[blocks + 1].starts_with("├"));
        assert!(plain[blocks + 2].contains("60%"));
        assert!(plain[blocks + 3].starts_with("│ 2 "));
        assert_eq!(plain.len(), blocks + 5);
    }
}
