use super::{Component, RenderContext};
use crate::utils::speed_to_human_readable;
use crate::widgets::{
    ansi::{truncate, StyledLine},
    bar::usage_bar,
};

/// IO graphs never scale below 1 MiB/s.
const IO_FLOOR: f64 = 1024.0 * 1024.0;
const MOUNT_WIDTH: usize = 10;

pub struct DiskPanel {
    pub max_disks: usize,
}

impl DiskPanel {
    pub fn new(max_disks: usize) -> Self {
        Self { max_disks }
    }
}

impl Component for DiskPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = ctx.style;
        let frame = style.frame(theme, theme.disk);
        let mut lines = vec![frame.top("DISK")];

        if style.graphs_visible() {
            let (read, write) = ctx.history.disk_io_graph_data(style.graph_width());
            lines.extend(ctx.rate_graph(&frame, &read, &write, IO_FLOOR));
        }

        let (read, write) = ctx.history.disk_io_rates();
        let mut io = StyledLine::new();
        io.push("R:", theme.low)
            .push_plain(&format!(" {:<10} ", speed_to_human_readable(read)))
            .push("W:", theme.accent)
            .push_plain(&format!(" {}", speed_to_human_readable(write)));
        lines.push(frame.line(io.as_str()));
        lines.push(frame.separator());

        let disks: Vec<_> = ctx.snapshot.disks.iter().take(self.max_disks).collect();
        let values: Vec<String> = disks
            .iter()
            .map(|d| format!("{:.0}/{:.0}GB", d.used_gb, d.total_gb))
            .collect();
        let value_width = values.iter().map(String::len).max().unwrap_or(0);
        let bar_width = style
            .content_width()
            .saturating_sub(MOUNT_WIDTH + 5 + value_width);

        for (disk, value) in disks.iter().zip(&values) {
            let mut line = StyledLine::new();
            line.push(
                &format!("{:<width$}", truncate(&disk.mount, MOUNT_WIDTH), width = MOUNT_WIDTH),
                theme.label,
            )
            .push_plain(" [")
            .push_raw(usage_bar(theme, disk.percent, bar_width, style.bar_glyphs()).as_str())
            .push_plain("] ")
            .push(value, theme.value);
            lines.push(frame.line(line.as_str()));
        }
        if disks.is_empty() {
            lines.push(frame.line("No disks"));
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
    fn mounts_are_truncated_and_capped() {
        let mut snapshot = sample_snapshot();
        snapshot.disks.push(snapshot.disks[0].clone());
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            width: 42,
            graph_height: 3,
            ..PanelStyle::default()
        };
        let lines = DiskPanel::new(2).render(&RenderContext::new(&snapshot, &history, &theme, style));
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();

        // top, 3 graph rows, io, separator, 2 disks, bottom
        assert_eq!(plain.len(), 9);
        assert!(plain[4].contains("R: 0B/s"));
        assert!(plain[6].starts_with("│ /          ["));
        assert!(plain[7].starts_with("│ /very/lon~ ["));
        assert!(plain[6].ends_with("100/200GB │"));
        assert!(plain[7].contains("90/100GB"));
        for line in &lines {
            assert_eq!(visible_len(line), 42);
        }
    }
}
