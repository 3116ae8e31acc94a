use super::{Component, RenderContext};
use crate::widgets::ansi::StyledLine;

pub struct MemoryPanel;

impl Component for MemoryPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = ctx.style;
        let mem = &ctx.snapshot.memory;
        let frame = style.frame(theme, theme.mem);
        let mut lines = vec![frame.top("MEMORY")];

        if style.graphs_visible() {
            let samples = ctx
                .history
                .memory_graph_data(style.graph_style.sub_columns(style.graph_width()));
            lines.extend(ctx.percent_graph(&frame, &samples));
            lines.push(frame.separator());
        }

        let ram = format!("{:.1}/{:.1}GB", mem.used_gb, mem.total_gb);
        let swap = (mem.swap_total_gb > 0.0)
            .then(|| format!("{:.1}/{:.1}GB", mem.swap_used_gb, mem.swap_total_gb));
        let value_width = ram
            .len()
            .max(swap.as_ref().map_or(0, String::len));

        lines.push(frame.line(ctx.meter("RAM", mem.percent, &ram, value_width).as_str()));

        let mut avail = StyledLine::new();
        avail
            .push(&format!("{:<6}", "Avail"), theme.label)
            .push_plain(" ")
            .push(&format!("{:.1}GB", mem.available_gb), theme.value);
        lines.push(frame.line(avail.as_str()));

        if let Some(swap) = swap {
            lines.push(frame.line(
                ctx.meter("Swap", mem.swap_percent, &swap, value_width).as_str(),
            ));
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

    fn render(snapshot: &crate::data::snapshot::SystemSnapshot, graphs: bool) -> Vec<String> {
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            width: 38,
            show_graphs: graphs,
            graph_height: 4,
            ..PanelStyle::default()
        };
        MemoryPanel.render(&RenderContext::new(snapshot, &history, &theme, style))
    }

    #[test]
    fn bars_share_one_width() {
        let lines = render(&sample_snapshot(), false);
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(plain.len(), 5);
        assert!(plain[1].starts_with("│ RAM    ["));
        assert!(plain[1].contains("8.0/16.0GB"));
        assert!(plain[2].contains("Avail  8.0GB"));
        assert!(plain[3].starts_with("│ Swap   ["));
        assert_eq!(plain[1].find(']'), plain[3].find(']'));
        for line in &lines {
            assert_eq!(visible_len(line), 38);
        }
    }

    #[test]
    fn swap_hidden_without_swap_space() {
        let mut snapshot = sample_snapshot();
        snapshot.memory.swap_total_gb = 0.0;
        let lines = render(&snapshot, true);
        // top, 4 graph rows, separator, ram, avail, bottom
        assert_eq!(lines.len(), 9);
        assert!(!lines.iter().any(|l| strip_ansi(l).contains("Swap")));
    }
}
