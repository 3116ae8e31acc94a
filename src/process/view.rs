use super::{SortDirection, SortKey};

/// Process picked for termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillTarget {
    pub pid: u32,
    pub name: String,
}

/// Transient state of the process list: selection, scroll, ordering and
/// filter. Row counts are synced back after every render so movement can
/// clamp without re-deriving the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessView {
    pub selected: usize,
    pub scroll: usize,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// Applied filter.
    pub filter: String,
    /// Query being typed; `Some` while search entry is open.
    pub search: Option<String>,
    pub tree: bool,
    pub row_count: usize,
    pub body_rows: usize,
    /// Row under the cursor at the last render.
    pub selected_target: Option<KillTarget>,
}

impl Default for ProcessView {
    fn default() -> Self {
        Self::new(SortKey::Cpu, false)
    }
}

impl ProcessView {
    pub fn new(sort_key: SortKey, tree: bool) -> Self {
        Self {
            selected: 0,
            scroll: 0,
            sort_key,
            sort_direction: sort_key.natural_direction(),
            filter: String::new(),
            search: None,
            tree,
            row_count: 0,
            body_rows: 1,
            selected_target: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// The filter rows are matched against right now. Typing narrows the
    /// list live.
    pub fn active_filter(&self) -> &str {
        self.search.as_deref().unwrap_or(&self.filter)
    }

    pub fn move_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn move_down(&mut self, step: usize) {
        let last = self.row_count.saturating_sub(1);
        self.selected = self.selected.saturating_add(step).min(last);
    }

    pub fn top(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn bottom(&mut self) {
        self.selected = self.row_count.saturating_sub(1);
    }

    pub fn page(&self) -> usize {
        self.body_rows.max(1)
    }

    /// Selection clamped to `count` rows and the scroll offset that keeps
    /// it inside a `body`-row window.
    pub fn window(&self, count: usize, body: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let body = body.max(1);
        let selected = self.selected.min(count - 1);
        let mut scroll = self.scroll.min(count.saturating_sub(body));
        if selected < scroll {
            scroll = selected;
        } else if selected >= scroll + body {
            scroll = selected + 1 - body;
        }
        (selected, scroll)
    }

    pub fn sync(&mut self, count: usize, body: usize, target: Option<KillTarget>) {
        let (selected, scroll) = self.window(count, body);
        self.selected = selected;
        self.scroll = scroll;
        self.row_count = count;
        self.body_rows = body.max(1);
        self.selected_target = target;
    }

    /// Next key, in that key's natural direction.
    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        self.sort_direction = self.sort_key.natural_direction();
    }

    pub fn reverse_sort(&mut self) {
        self.sort_direction = self.sort_direction.reversed();
    }

    pub fn toggle_tree(&mut self) {
        self.tree = !self.tree;
        self.top();
    }

    pub fn start_search(&mut self) {
        self.search = Some(self.filter.clone());
    }

    pub fn push_search(&mut self, c: char) {
        if let Some(query) = self.search.as_mut() {
            query.push(c);
            self.top();
        }
    }

    pub fn pop_search(&mut self) {
        if let Some(query) = self.search.as_mut() {
            query.pop();
            self.top();
        }
    }

    pub fn confirm_search(&mut self) {
        if let Some(query) = self.search.take() {
            self.filter = query.trim().to_string();
            self.top();
        }
    }

    /// Close search entry, keeping the filter that was applied before it opened.
    pub fn cancel_search(&mut self) {
        if self.search.take().is_some() {
            self.top();
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.top();
    }

    pub fn reset(&mut self) {
        self.search = None;
        self.filter.clear();
        self.top();
    }
}
