use crossterm::style::{style, Color, Stylize};
use unicode_width::UnicodeWidthStr;

const ESC: char = '\x1b';

/// Remove every escape sequence from `text`, leaving only printable content.
///
/// CSI sequences (`ESC [` params, intermediates, final byte in `@..~`) are
/// consumed as a unit. Any other `ESC x` pair is dropped as two characters.
pub fn strip_ansi(text: &str) -> String {
    if !text.contains(ESC) {
        return text.to_string();
    }

    #[derive(Clone, Copy)]
    enum State {
        Text,
        Escape,
        Csi,
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Text;
    for ch in text.chars() {
        state = match state {
            State::Text if ch == ESC => State::Escape,
            State::Text => {
                out.push(ch);
                State::Text
            }
            State::Escape if ch == '[' => State::Csi,
            State::Escape => State::Text,
            State::Csi if ('@'..='~').contains(&ch) => State::Text,
            State::Csi => State::Csi,
        };
    }
    out
}

/// Display width of `text` once escapes are stripped.
pub fn visible_len(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Wrap `text` in a foreground color followed by a reset.
pub fn paint(text: &str, color: Color) -> String {
    style(text).with(color).to_string()
}

/// Like [`paint`], bold.
pub fn paint_bold(text: &str, color: Color) -> String {
    style(text).with(color).bold().to_string()
}

/// A line being assembled from colored segments. Width is tracked as
/// segments are pushed so callers never re-measure the escaped string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    text: String,
    width: usize,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: &str) -> Self {
        let mut line = Self::new();
        line.push_plain(text);
        line
    }

    pub fn push_plain(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self.width += text.width();
        self
    }

    pub fn push(&mut self, text: &str, color: Color) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        self.text.push_str(&paint(text, color));
        self.width += text.width();
        self
    }

    pub fn push_bold(&mut self, text: &str, color: Color) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        self.text.push_str(&paint_bold(text, color));
        self.width += text.width();
        self
    }

    /// Append an already-escaped fragment, measuring it once.
    pub fn push_raw(&mut self, fragment: &str) -> &mut Self {
        self.width += visible_len(fragment);
        self.text.push_str(fragment);
        self
    }

    pub fn pad_to(&mut self, width: usize) -> &mut Self {
        if self.width < width {
            let fill = width - self.width;
            self.text.extend(std::iter::repeat(' ').take(fill));
            self.width = width;
        }
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for StyledLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Cut `text` to at most `max` display columns, appending `~` when shortened.
/// Expects plain text.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('~');
    out
}
