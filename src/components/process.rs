use super::{Component, PanelStyle, RenderContext};
use crate::process::{visible_rows, KillTarget, ProcessRow, ProcessView, SortKey};
use crate::theme::Theme;
use crate::widgets::{
    ansi::{truncate, StyledLine},
    bar::heat_color,
};

/// Rows taken by the border, column header and separator.
const CHROME_ROWS: usize = 4;
/// Marker, PID, USER, CPU% and MEM% columns with their gaps.
const FIXED_COLUMNS: usize = 35;
const MAX_INDENT: usize = 8;

/// Process table: sorted or tree-ordered, filtered, scrolled to keep the
/// selection visible.
pub struct ProcessPanel<'a> {
    pub view: &'a ProcessView,
    pub kill_prompt: Option<&'a KillTarget>,
    pub width: usize,
    pub height: usize,
}

/// Lines plus what the view needs to sync its selection afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRender {
    pub lines: Vec<String>,
    pub row_count: usize,
    pub body_rows: usize,
    pub target: Option<KillTarget>,
}

impl<'a> ProcessPanel<'a> {
    pub fn new(view: &'a ProcessView, width: usize, height: usize) -> Self {
        Self {
            view,
            kill_prompt: None,
            width,
            height,
        }
    }

    pub fn with_kill_prompt(mut self, target: Option<&'a KillTarget>) -> Self {
        self.kill_prompt = target;
        self
    }

    pub fn body_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS).max(1)
    }

    fn title(&self, count: usize) -> String {
        let mut title = format!("PROCESSES ({count})");
        match &self.view.search {
            Some(query) => title.push_str(&format!(" /{query}_")),
            None if !self.view.filter.is_empty() => {
                title.push_str(&format!(" /{}", self.view.filter))
            }
            None => {}
        }
        if self.view.tree {
            title.push_str(" [TREE]");
        }
        title
    }

    fn header(&self, theme: &Theme) -> String {
        let label = |key: SortKey, text: &str| {
            if self.view.sort_key == key {
                format!("{}{}", text, self.view.sort_direction.arrow())
            } else {
                text.to_string()
            }
        };
        let mut line = StyledLine::new();
        line.push_bold(
            &format!(
                "  {:>7} {:<10} {:>6} {:>6} {}",
                label(SortKey::Pid, "PID"),
                "USER",
                label(SortKey::Cpu, "CPU%"),
                label(SortKey::Memory, "MEM%"),
                label(SortKey::Name, "NAME"),
            ),
            theme.header,
        );
        line.into_string()
    }

    fn row(&self, theme: &Theme, row: &ProcessRow<'_>, selected: bool, name_width: usize) -> String {
        let p = row.process;
        let mut name = String::new();
        if self.view.tree && row.depth > 0 {
            name.push_str(&"  ".repeat(row.depth.min(MAX_INDENT) - 1));
            name.push_str("└ ");
        }
        name.push_str(&p.name);
        let name = truncate(&name, name_width);
        let user = truncate(&p.user, 10);

        let mut line = StyledLine::new();
        if selected {
            line.push_bold(
                &format!(
                    "> {:>7} {:<10} {:>6.1} {:>6.1} {}",
                    p.pid, user, p.cpu_percent, p.mem_percent, name
                ),
                theme.selected,
            );
        } else {
            line.push_plain("  ")
                .push(&format!("{:>7}", p.pid), theme.value)
                .push_plain(" ")
                .push(&format!("{:<10}", user), theme.label)
                .push_plain(" ")
                .push(&format!("{:>6.1}", p.cpu_percent), heat_color(theme, p.cpu_percent))
                .push_plain(" ")
                .push(&format!("{:>6.1}", p.mem_percent), heat_color(theme, p.mem_percent))
                .push_plain(" ")
                .push_plain(&name);
        }
        line.into_string()
    }

    pub fn render_rows(&self, ctx: &RenderContext<'_>) -> ProcessRender {
        let theme = ctx.theme;
        let style = PanelStyle {
            width: self.width,
            ..ctx.style
        };
        let frame = style.frame(theme, theme.process);
        let name_width = style.content_width().saturating_sub(FIXED_COLUMNS).max(4);

        let rows = visible_rows(&ctx.snapshot.processes, self.view);
        let body = self.body_rows();
        let (selected, scroll) = self.view.window(rows.len(), body);

        let mut lines = Vec::with_capacity(body + CHROME_ROWS);
        lines.push(frame.top(&self.title(rows.len())));
        lines.push(frame.line(&self.header(theme)));
        lines.push(frame.separator());

        let mut body_lines: Vec<String> = rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(body)
            .map(|(i, row)| frame.line(&self.row(theme, row, i == selected, name_width)))
            .collect();
        if rows.is_empty() {
            let message = if self.view.active_filter().trim().is_empty() {
                "No processes"
            } else {
                "No matching processes"
            };
            body_lines.push(frame.line(&StyledLine::plain(message).into_string()));
        }
        body_lines.resize(body, frame.empty_line());

        if let (Some(target), Some(last)) = (self.kill_prompt, body_lines.last_mut()) {
            let mut prompt = StyledLine::new();
            prompt.push_bold(
                &truncate(
                    &format!("Kill {} ({})? [y/N]", target.name, target.pid),
                    style.content_width(),
                ),
                theme.high,
            );
            *last = frame.line(prompt.as_str());
        }
        lines.extend(body_lines);
        lines.push(frame.bottom());

        let target = rows.get(selected).map(|row| KillTarget {
            pid: row.process.pid,
            name: row.process.name.clone(),
        });
        ProcessRender {
            lines,
            row_count: rows.len(),
            body_rows: body,
            target,
        }
    }
}

impl Component for ProcessPanel<'_> {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        self.render_rows(ctx).lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::sample_snapshot;
    use crate::data::history::SystemHistory;
    use crate::widgets::ansi::{strip_ansi, visible_len};

    fn render(view: &ProcessView, kill: Option<&KillTarget>) -> ProcessRender {
        let snapshot = sample_snapshot();
        let history = SystemHistory::default();
        let theme = Theme::default();
        let ctx = RenderContext::new(&snapshot, &history, &theme, PanelStyle::default());
        ProcessPanel::new(view, 86, 10)
            .with_kill_prompt(kill)
            .render_rows(&ctx)
    }

    #[test]
    fn fixed_height_and_width() {
        let out = render(&ProcessView::default(), None);
        assert_eq!(out.lines.len(), 10);
        assert_eq!(out.body_rows, 6);
        assert_eq!(out.row_count, 12);
        for line in &out.lines {
            assert_eq!(visible_len(line), 86, "{}", strip_ansi(line));
        }
    }

    #[test]
    fn busiest_first_with_marker_on_selection() {
        let out = render(&ProcessView::default(), None);
        let plain: Vec<String> = out.lines.iter().map(|l| strip_ansi(l)).collect();
        assert!(plain[0].contains("PROCESSES (12)"));
        assert!(plain[1].contains("CPU%▼"));
        assert!(plain[3].starts_with("│ >      12 root"));
        assert!(plain[4].starts_with("│        11 root"));
        assert_eq!(out.target, Some(KillTarget { pid: 12, name: "proc12".into() }));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let mut view = ProcessView::default();
        view.selected = 9;
        let out = render(&view, None);
        let plain: Vec<String> = out.lines.iter().map(|l| strip_ansi(l)).collect();
        // pids 12..1 in order; row 9 is pid 3, window holds rows 4..=9
        assert!(plain[8].starts_with("│ >       3"));
        assert!(plain[3].contains("   8 root"));
    }

    #[test]
    fn filter_title_and_empty_rows() {
        let view = ProcessView {
            filter: "proc1".into(),
            tree: true,
            ..ProcessView::default()
        };
        let out = render(&view, None);
        let plain: Vec<String> = out.lines.iter().map(|l| strip_ansi(l)).collect();
        // proc1, proc10, proc11, proc12
        assert_eq!(out.row_count, 4);
        assert!(plain[0].contains("PROCESSES (4) /proc1 [TREE]"));
        assert!(plain[4].contains("└ proc12"));
        assert_eq!(plain[8].trim_matches(|c| c == '│' || c == ' '), "");
    }

    #[test]
    fn kill_prompt_replaces_last_body_row() {
        let target = KillTarget {
            pid: 7,
            name: "proc7".into(),
        };
        let out = render(&ProcessView::default(), Some(&target));
        let plain = strip_ansi(&out.lines[8]);
        assert!(plain.contains("Kill proc7 (7)? [y/N]"));
    }

    #[test]
    fn no_match_message() {
        let view = ProcessView {
            search: Some("zzz".into()),
            ..ProcessView::default()
        };
        let out = render(&view, None);
        assert_eq!(out.row_count, 0);
        assert_eq!(out.target, None);
        assert!(strip_ansi(&out.lines[0]).contains("/zzz_"));
        assert!(strip_ansi(&out.lines[3]).contains("No matching processes"));
    }
}
