use super::{Component, RenderContext};
use crate::config::TempUnit;
use crate::theme::Theme;
use crate::widgets::ansi::{paint, truncate, StyledLine};
use crossterm::style::Color;

const TEMP_WARM: f64 = 60.0;
const TEMP_HOT: f64 = 80.0;

pub struct GpuPanel {
    pub temp_unit: TempUnit,
}

impl GpuPanel {
    pub fn new(temp_unit: TempUnit) -> Self {
        Self { temp_unit }
    }
}

fn temp_color(theme: &Theme, celsius: f64) -> Color {
    if celsius >= TEMP_HOT {
        theme.high
    } else if celsius >= TEMP_WARM {
        theme.mid
    } else {
        theme.low
    }
}

impl Component for GpuPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = ctx.style;
        let gpu = &ctx.snapshot.gpu;
        let frame = style.frame(theme, theme.gpu);
        let mut lines = vec![frame.top("GPU")];

        let name = if gpu.name.is_empty() {
            "No GPU detected"
        } else {
            gpu.name.as_str()
        };
        lines.push(frame.line(&paint(
            &truncate(name, style.content_width()),
            theme.value,
        )));

        let Some(usage) = gpu.usage_percent else {
            lines.push(frame.line(&paint("Stats unavailable", theme.graph_empty)));
            lines.push(frame.bottom());
            return lines;
        };

        if style.graphs_visible() {
            let samples = ctx
                .history
                .gpu_graph_data(style.graph_style.sub_columns(style.graph_width()));
            lines.extend(ctx.percent_graph(&frame, &samples));
            lines.push(frame.separator());
        }

        let usage_value = format!("{:5.1}%", usage);
        let vram = match (gpu.vram_percent(), gpu.vram_used_mb, gpu.vram_total_mb) {
            (Some(pct), Some(used), Some(total)) => {
                Some((pct, format!("{:.0}/{:.0}MB", used, total)))
            }
            _ => None,
        };
        let value_width = vram
            .as_ref()
            .map_or(0, |(_, v)| v.len())
            .max(usage_value.len());

        lines.push(frame.line(
            ctx.meter("Usage", usage, &usage_value, value_width).as_str(),
        ));
        if let Some((pct, value)) = vram {
            lines.push(frame.line(ctx.meter("VRAM", pct, &value, value_width).as_str()));
        }

        let mut temp = StyledLine::new();
        temp.push(&format!("{:<6}", "Temp"), theme.label).push_plain(" ");
        match gpu.temp_c {
            Some(c) => temp.push(&self.temp_unit.format(c), temp_color(theme, c)),
            None => temp.push("N/A", theme.graph_empty),
        };
        lines.push(frame.line(temp.as_str()));

        lines.push(frame.bottom());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{testing::sample_snapshot, PanelStyle};
    use crate::data::history::SystemHistory;
    use crate::data::snapshot::GpuSnapshot;
    use crate::widgets::ansi::{strip_ansi, visible_len};

    fn plain_lines(gpu: GpuSnapshot, unit: TempUnit) -> Vec<String> {
        let mut snapshot = sample_snapshot();
        snapshot.gpu = gpu;
        let history = SystemHistory::default();
        let theme = Theme::default();
        let style = PanelStyle {
            show_graphs: false,
            ..PanelStyle::default()
        };
        let lines = GpuPanel::new(unit).render(&RenderContext::new(&snapshot, &history, &theme, style));
        for line in &lines {
            assert_eq!(visible_len(line), style.width);
        }
        lines.iter().map(|l| strip_ansi(l)).collect()
    }

    #[test]
    fn placeholder_without_usage() {
        let lines = plain_lines(GpuSnapshot::unavailable(), TempUnit::Celsius);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("No GPU detected"));
        assert!(lines[2].contains("Stats unavailable"));
    }

    #[test]
    fn full_stats_in_fahrenheit() {
        let lines = plain_lines(sample_snapshot().gpu, TempUnit::Fahrenheit);
        assert!(lines[2].contains("Usage  ["));
        assert!(lines[3].contains("2048/8192MB"));
        assert!(lines[4].contains("Temp   149°F"));
    }

    #[test]
    fn missing_fields_degrade() {
        let gpu = GpuSnapshot {
            name: "Partial".into(),
            usage_percent: Some(10.0),
            ..GpuSnapshot::default()
        };
        let lines = plain_lines(gpu, TempUnit::Celsius);
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("Temp   N/A"));
    }

    #[test]
    fn temperature_tiers() {
        let theme = Theme::default();
        assert_eq!(temp_color(&theme, 59.0), theme.low);
        assert_eq!(temp_color(&theme, 60.0), theme.mid);
        assert_eq!(temp_color(&theme, 80.0), theme.high);
    }
}
