use crossterm::style::Color;

mod palettes;

/// Semantic role to color mapping. Themes are swapped whole, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Key used in config files and on the command line.
    pub name: &'static str,
    pub display_name: &'static str,
    pub title: Color,
    pub border: Color,
    pub label: Color,
    pub value: Color,
    /// Usage below 50%.
    pub low: Color,
    /// Usage from 50% up to 80%.
    pub mid: Color,
    /// Usage from 80%.
    pub high: Color,
    pub accent: Color,
    pub cpu: Color,
    pub gpu: Color,
    pub mem: Color,
    pub disk: Color,
    pub net: Color,
    pub process: Color,
    pub selected: Color,
    pub graph_fill: Color,
    pub graph_empty: Color,
    pub header: Color,
    pub footer: Color,
}

impl Default for Theme {
    fn default() -> Self {
        palettes::DEFAULT
    }
}

impl Theme {
    pub fn cycle() -> &'static [Theme] {
        &palettes::ALL
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::cycle().iter().map(|theme| theme.name)
    }

    /// Position of `name` in the cycle, case-insensitive.
    pub fn index_of(name: &str) -> Option<usize> {
        Self::cycle()
            .iter()
            .position(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Theme at `index`, wrapping around the cycle.
    pub fn at(index: usize) -> Theme {
        let cycle = Self::cycle();
        cycle[index % cycle.len()]
    }

    pub fn by_name(name: &str) -> Theme {
        Self::index_of(name).map(Self::at).unwrap_or_default()
    }

    pub fn next_index(index: usize) -> usize {
        (index + 1) % Self::cycle().len()
    }

    pub fn prev_index(index: usize) -> usize {
        let len = Self::cycle().len();
        (index % len + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Theme::index_of("Nord"), Some(2));
        assert_eq!(Theme::by_name("DRACULA").name, "dracula");
        assert_eq!(Theme::by_name("missing"), Theme::default());
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let last = Theme::cycle().len() - 1;
        assert_eq!(Theme::next_index(last), 0);
        assert_eq!(Theme::prev_index(0), last);
        assert_eq!(Theme::at(last + 1).name, "default");
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Theme::names().collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len);
    }
}
