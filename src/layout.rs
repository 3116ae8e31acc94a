use crate::{
    data::snapshot::SystemSnapshot,
    state::UiState,
    theme::Theme,
    utils::format_uptime,
    widgets::ansi::{truncate, visible_len, StyledLine},
};
use chrono::Local;

pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 24;
/// Used when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (100, 40);
/// Columns between side-by-side panels.
pub const PANEL_GAP: usize = 2;
/// Left margin of every panel row.
pub const MARGIN: &str = "  ";

/// Panel geometry for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: usize,
    pub rows: usize,
    pub panel_width: usize,
    pub graph_height: usize,
    pub process_height: usize,
    pub process_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(FALLBACK_SIZE.0, FALLBACK_SIZE.1)
    }
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = usize::from(cols.max(MIN_COLS));
        let rows = usize::from(rows.max(MIN_ROWS));

        let panel_width = match cols {
            c if c >= 160 => 50,
            c if c >= 100 => 42,
            _ => 38,
        };
        let graph_height = match rows {
            r if r >= 50 => 6,
            r if r >= 40 => 5,
            _ => 4,
        };

        Self {
            cols,
            rows,
            panel_width,
            graph_height,
            process_height: rows.saturating_sub(35).max(10),
            process_width: (2 * panel_width + 2).min(cols - 4),
        }
    }

    /// Disk and GPU panels carry one graph row less.
    pub fn compact_graph_height(&self) -> usize {
        self.graph_height.saturating_sub(1)
    }

    /// Whether `count` panels fit on one row with their gaps.
    pub fn fits_side_by_side(&self, count: usize) -> bool {
        self.cols >= (self.panel_width + PANEL_GAP) * count
    }
}

/// Current terminal size, or [`FALLBACK_SIZE`] when it cannot be read.
pub fn terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        Ok(_) => FALLBACK_SIZE,
        Err(err) => {
            tracing::debug!(error = %err, "terminal size unavailable");
            FALLBACK_SIZE
        }
    }
}

pub fn is_too_small(cols: u16, rows: u16) -> bool {
    cols < MIN_COLS || rows < MIN_ROWS
}

/// Place panels side by side. Shorter panels are padded with blank lines as
/// wide as their first line; empty panels are dropped.
pub fn combine_rows(panels: &[Vec<String>], gap: usize) -> Vec<String> {
    let panels: Vec<&Vec<String>> = panels.iter().filter(|p| !p.is_empty()).collect();
    let height = panels.iter().map(|p| p.len()).max().unwrap_or(0);
    let widths: Vec<usize> = panels.iter().map(|p| visible_len(&p[0])).collect();
    let gap = " ".repeat(gap);

    (0..height)
        .map(|i| {
            panels
                .iter()
                .zip(&widths)
                .map(|(panel, width)| match panel.get(i) {
                    Some(line) => line.clone(),
                    None => " ".repeat(*width),
                })
                .collect::<Vec<_>>()
                .join(&gap)
        })
        .collect()
}

/// Host, OS, uptime, load, clock and theme on one line.
pub fn header_line(snapshot: &SystemSnapshot, theme: &Theme, width: usize) -> String {
    let mut parts = vec![
        snapshot.network.hostname.clone(),
        snapshot.system.os.clone(),
    ];
    if let Some(secs) = snapshot.system.uptime_secs {
        parts.push(format!("up {}", format_uptime(secs)));
    }
    if let Some([one, five, fifteen]) = snapshot.system.load_avg {
        parts.push(format!("load {:.2} {:.2} {:.2}", one, five, fifteen));
    }
    parts.push(Local::now().format("%H:%M:%S").to_string());
    parts.push(format!("Theme: {}", theme.display_name));

    let info = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    let mut line = StyledLine::plain(MARGIN);
    line.push_bold("sysdash", theme.title).push_plain("  ");
    let room = width.saturating_sub(line.width());
    line.push(&truncate(&info, room), theme.header);
    line.into_string()
}

/// Rule, status bar and the latest status message.
pub fn footer_lines(state: &UiState, theme: &Theme, width: usize) -> Vec<String> {
    let rule = StyledLine::new()
        .push_plain(MARGIN)
        .push(&"─".repeat(width.saturating_sub(4)), theme.border)
        .to_string();

    let mut status = StyledLine::plain(MARGIN);
    status
        .push(&format!("sysdash v{}", env!("CARGO_PKG_VERSION")), theme.footer)
        .push(" | ", theme.footer)
        .push(&format!("[LIVE {:.1}s]", state.refresh_rate), theme.low)
        .push(
            &format!(" | Theme: {} | Press ? for help", state.theme().display_name),
            theme.footer,
        );

    let mut lines = vec![rule, status.into_string()];
    if let Some(message) = &state.status {
        let room = width.saturating_sub(MARGIN.len());
        lines.push(
            StyledLine::plain(MARGIN)
                .push(&truncate(message, room), theme.accent)
                .to_string(),
        );
    }
    lines
}

/// Shown instead of the dashboard below the minimum size.
pub fn too_small_message(cols: u16, rows: u16, theme: &Theme) -> Vec<String> {
    vec![
        StyledLine::new()
            .push_bold("Terminal too small", theme.high)
            .to_string(),
        format!("{cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}"),
    ]
}
