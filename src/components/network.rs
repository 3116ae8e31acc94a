use super::{Component, RenderContext};
use crate::utils::{bytes_to_human_readable, speed_to_human_readable};
use crate::widgets::ansi::{truncate, StyledLine};

/// Rate graphs never scale below 1 KiB/s so idle links stay flat.
const RATE_FLOOR: f64 = 1024.0;

pub struct NetworkPanel {
    pub max_interfaces: usize,
}

impl NetworkPanel {
    pub fn new(max_interfaces: usize) -> Self {
        Self { max_interfaces }
    }
}

impl Component for NetworkPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = ctx.style;
        let net = &ctx.snapshot.network;
        let frame = style.frame(theme, theme.net);
        let mut lines = vec![frame.top("NETWORK")];

        let host = if net.hostname.is_empty() {
            "unknown"
        } else {
            net.hostname.as_str()
        };
        let mut host_line = StyledLine::new();
        host_line
            .push("Host", theme.label)
            .push_plain("  ")
            .push_plain(&truncate(host, style.content_width().saturating_sub(6)));
        lines.push(frame.line(host_line.as_str()));

        for (iface, ip) in net.interface_ips.iter().take(self.max_interfaces) {
            let mut line = StyledLine::new();
            line.push(&format!("{:<6}", truncate(iface, 6)), theme.label)
                .push_plain(" ")
                .push_plain(ip);
            lines.push(frame.line(line.as_str()));
        }
        lines.push(frame.separator());

        if style.graphs_visible() {
            let (up, down) = ctx.history.network_graph_data(style.graph_width());
            lines.extend(ctx.rate_graph(&frame, &up, &down, RATE_FLOOR));
            lines.push(frame.separator());
        }

        let (up, down) = ctx.history.network_rates();
        let mut speeds = StyledLine::new();
        speeds
            .push(&format!("^ {:<12}", speed_to_human_readable(up)), theme.low)
            .push_plain(" ")
            .push(&format!("v {}", speed_to_human_readable(down)), theme.accent);
        lines.push(frame.line(speeds.as_str()));

        let mut totals = StyledLine::new();
        totals
            .push("TX", theme.low)
            .push_plain(&format!(
                " {:<12} ",
                bytes_to_human_readable(net.bytes_sent as f64)
            ))
            .push("RX", theme.accent)
            .push_plain(&format!(" {}", bytes_to_human_readable(net.bytes_recv as f64)));
        lines.push(frame.line(totals.as_str()));

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
    use std::time::{Duration, Instant};

    #[test]
    fn shows_rates_and_totals() {
        let mut snapshot = sample_snapshot();
        let mut history = SystemHistory::default();
        let start = Instant::now();
        snapshot.network.bytes_sent = 0;
        snapshot.network.bytes_recv = 0;
        history.record_at(&snapshot, start);
        snapshot.network.bytes_sent = 2048;
        snapshot.network.bytes_recv = 3 * 1024 * 1024;
        history.record_at(&snapshot, start + Duration::from_secs(1));

        let theme = Theme::default();
        let style = PanelStyle {
            width: 42,
            graph_height: 4,
            ..PanelStyle::default()
        };
        let lines = NetworkPanel::new(2).render(&RenderContext::new(&snapshot, &history, &theme, style));
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();

        assert!(plain[1].contains("Host  testhost"));
        assert!(plain[2].contains("eth0   10.0.0.2"));
        assert!(plain.iter().any(|l| l.contains("^ 2.0KB/s") && l.contains("v 3.0MB/s")));
        assert!(plain.iter().any(|l| l.contains("TX 2.0KB") && l.contains("RX 3.0MB")));
        // top, host, ip, separator, graph, separator, speeds, totals, bottom
        assert_eq!(lines.len(), 4 + 4 + 1 + 3);
        for line in &lines {
            assert_eq!(visible_len(line), 42);
        }
    }

    #[test]
    fn interface_list_is_capped() {
        let mut snapshot = sample_snapshot();
        for i in 0..5 {
            snapshot
                .network
                .interface_ips
                .insert(format!("wlan{i}"), format!("192.168.0.{i}"));
        }
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            show_graphs: false,
            ..PanelStyle::default()
        };
        let lines = NetworkPanel::new(2).render(&RenderContext::new(&snapshot, &history, &theme, style));
        let ips = lines
            .iter()
            .filter(|l| strip_ansi(l).contains("192.168") || strip_ansi(l).contains("10.0.0"))
            .count();
        assert_eq!(ips, 2);
    }
}
