use super::{Component, PanelStyle, RenderContext};
use crate::widgets::ansi::StyledLine;

pub const HELP_WIDTH: usize = 60;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / Down", "Move down"),
            ("k / Up", "Move up"),
            ("PgDn / PgUp", "Page down / up"),
            ("g / Home", "Go to top"),
            ("G / End", "Go to bottom"),
        ],
    ),
    (
        "Panels",
        &[
            ("1 - 5", "Toggle CPU, memory, network, disk, GPU"),
            ("p", "Toggle process list"),
            ("h", "Toggle graphs"),
        ],
    ),
    (
        "Processes",
        &[
            ("/", "Search (Enter apply, Esc cancel)"),
            ("s / i", "Cycle sort key / invert order"),
            ("t", "Toggle tree view"),
            ("K", "Kill selected process (SIGTERM)"),
        ],
    ),
    (
        "Display",
        &[
            ("c / C", "Next / previous theme"),
            ("+ / -", "Faster / slower refresh"),
            ("r", "Reset view"),
            ("w", "Save config"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle this help"), ("Esc", "Close / clear filter"), ("q", "Quit")],
    ),
];

/// Keyboard reference overlay.
pub struct HelpPanel;

impl Component for HelpPanel {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let style = PanelStyle {
            width: HELP_WIDTH,
            ..ctx.style
        };
        let frame = style.frame(theme, theme.title);
        let mut lines = vec![frame.top("HELP - Keyboard Shortcuts")];

        for (section, keys) in SECTIONS {
            lines.push(frame.line(&StyledLine::new().push_bold(section, theme.accent).to_string()));
            lines.push(frame.separator());
            for (key, description) in keys.iter() {
                let mut line = StyledLine::new();
                line.push(&format!("{:<12}", key), theme.label)
                    .push_plain(" ")
                    .push(description, theme.value);
                lines.push(frame.line(line.as_str()));
            }
            lines.push(frame.empty_line());
        }

        lines.push(frame.line(&StyledLine::new().push("Press ? or Esc to close", theme.graph_empty).to_string()));
        lines.push(frame.bottom());
        lines
    }
}
