use super::ansi::{paint, visible_len};
use crossterm::style::Color;
use ratatui::symbols::line;

/// Plain ASCII borders for terminals without box-drawing glyphs.
pub const ASCII: line::Set = line::Set {
    vertical: "|",
    horizontal: "-",
    top_right: "+",
    top_left: "+",
    bottom_right: "+",
    bottom_left: "+",
    vertical_left: "+",
    vertical_right: "+",
    horizontal_down: "+",
    horizontal_up: "+",
    cross: "+",
};

/// Border vocabulary for a panel of fixed outer width.
///
/// Every line a frame produces is exactly `width` visible columns, except
/// when content overflows: padding clamps to zero and the line grows.
#[derive(Debug, Clone, Copy)]
pub struct BoxFrame {
    pub width: usize,
    pub set: line::Set,
    pub border_color: Option<Color>,
    pub title_color: Option<Color>,
}

impl BoxFrame {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            set: line::ROUNDED,
            border_color: None,
            title_color: None,
        }
    }

    pub fn with_set(mut self, set: line::Set) -> Self {
        self.set = set;
        self
    }

    pub fn with_colors(mut self, border: Color, title: Color) -> Self {
        self.border_color = Some(border);
        self.title_color = Some(title);
        self
    }

    fn border(&self, text: &str) -> String {
        match self.border_color {
            Some(color) => paint(text, color),
            None => text.to_string(),
        }
    }

    fn inner(&self) -> usize {
        self.width.saturating_sub(2)
    }

    pub fn top(&self, title: &str) -> String {
        let h = self.set.horizontal;
        if title.is_empty() {
            return self.border(&format!(
                "{}{}{}",
                self.set.top_left,
                h.repeat(self.inner()),
                self.set.top_right
            ));
        }

        let label = format!(" {} ", title);
        let pad = self
            .inner()
            .saturating_sub(visible_len(&label))
            .saturating_sub(1);
        let label = match self.title_color {
            Some(color) => paint(&label, color),
            None => label,
        };
        format!(
            "{}{}{}",
            self.border(&format!("{}{}", self.set.top_left, h)),
            label,
            self.border(&format!("{}{}", h.repeat(pad), self.set.top_right))
        )
    }

    pub fn line(&self, content: &str) -> String {
        let pad = self
            .inner()
            .saturating_sub(visible_len(content))
            .saturating_sub(1);
        let v = self.border(self.set.vertical);
        format!("{} {}{}{}", v, content, " ".repeat(pad), v)
    }

    pub fn empty_line(&self) -> String {
        self.line("")
    }

    pub fn separator(&self) -> String {
        self.border(&format!(
            "{}{}{}",
            self.set.vertical_right,
            self.set.horizontal.repeat(self.inner()),
            self.set.vertical_left
        ))
    }

    pub fn bottom(&self) -> String {
        self.border(&format!(
            "{}{}{}",
            self.set.bottom_left,
            self.set.horizontal.repeat(self.inner()),
            self.set.bottom_right
        ))
    }
}

pub fn box_top(title: &str, width: usize) -> String {
    BoxFrame::new(width).top(title)
}

pub fn box_line(content: &str, width: usize) -> String {
    BoxFrame::new(width).line(content)
}

pub fn box_separator(width: usize) -> String {
    BoxFrame::new(width).separator()
}

pub fn box_bottom(width: usize) -> String {
    BoxFrame::new(width).bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_line_pads_by_visible_width() {
        let line = box_line("\x1b[92mOK\x1b[0m", 10);
        assert_eq!(visible_len(&line), 10);
        assert!(line.starts_with("│ "));
        assert!(line.ends_with('│'));
    }

    #[test]
    fn overflowing_content_clamps_padding() {
        let line = box_line("0123456789abcdef", 10);
        assert_eq!(visible_len(&line), 19);
    }

    #[test]
    fn top_embeds_title() {
        let top = box_top("CPU", 20);
        assert_eq!(top, format!("╭─ CPU {}╮", "─".repeat(12)));
        assert_eq!(visible_len(&top), 20);
    }

    #[test]
    fn top_with_long_title_never_panics() {
        let top = box_top("A VERY LONG PANEL TITLE", 10);
        assert!(top.starts_with("╭─ A VERY"));
        assert!(top.ends_with('╮'));
    }

    #[test]
    fn separator_and_bottom_match_width() {
        assert_eq!(box_separator(6), "├────┤");
        assert_eq!(box_bottom(6), "╰────╯");
    }

    #[test]
    fn colored_frame_keeps_widths() {
        let frame = BoxFrame::new(24).with_colors(Color::DarkGrey, Color::Cyan);
        for line in [
            frame.top("MEM"),
            frame.line("x"),
            frame.separator(),
            frame.bottom(),
        ] {
            assert_eq!(visible_len(&line), 24);
        }
    }

    #[test]
    fn ascii_set_uses_plain_glyphs() {
        let frame = BoxFrame::new(8).with_set(ASCII);
        assert_eq!(frame.top(""), "+------+");
        assert_eq!(frame.line("ab"), "| ab   |");
    }
}
