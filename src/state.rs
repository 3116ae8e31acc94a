use crate::{
    action::{Action, Panel},
    config::{clamp_refresh, AppConfig, PanelConfig, TempUnit, REFRESH_STEP},
    process::{KillTarget, ProcessView},
    theme::Theme,
    widgets::graph::GraphStyle,
};
use chrono::Local;

/// Per-panel limits fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub max_cores: usize,
    pub max_disks: usize,
    pub max_interfaces: usize,
    pub temp_unit: TempUnit,
    pub unicode: bool,
}

impl From<&AppConfig> for DisplayOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_cores: config.max_cores,
            max_disks: config.max_disks,
            max_interfaces: config.max_interfaces,
            temp_unit: config.temp_unit,
            unicode: config.unicode_borders,
        }
    }
}

/// Everything the user can change while the dashboard runs.
///
/// Mutated only by [`apply`]. Side effects the state cannot perform itself
/// (signals, config writes, clearing history) are left as requests for the
/// app loop to pick up.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub panels: PanelConfig,
    pub show_graphs: bool,
    pub show_help: bool,
    pub theme_index: usize,
    /// Seconds between samples.
    pub refresh_rate: f64,
    pub graph_style: GraphStyle,
    pub process: ProcessView,
    /// Process awaiting confirmation.
    pub kill_prompt: Option<KillTarget>,
    /// Confirmed, not yet signalled.
    pub pending_kill: Option<KillTarget>,
    pub status: Option<String>,
    pub should_quit: bool,
    pub save_requested: bool,
    pub reset_requested: bool,
    /// Columns, rows.
    pub term_size: (u16, u16),
    pub display: DisplayOptions,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default(), (100, 40))
    }
}

impl UiState {
    pub fn from_config(config: &AppConfig, term_size: (u16, u16)) -> Self {
        Self {
            panels: config.panels,
            show_graphs: config.show_graphs,
            show_help: false,
            theme_index: Theme::index_of(&config.theme).unwrap_or(0),
            refresh_rate: clamp_refresh(config.refresh_rate),
            graph_style: config.graph_style,
            process: ProcessView::new(config.sort_by, config.tree_view),
            kill_prompt: None,
            pending_kill: None,
            status: None,
            should_quit: false,
            save_requested: false,
            reset_requested: false,
            term_size,
            display: DisplayOptions::from(config),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::at(self.theme_index)
    }

    /// Set the footer message, stamped with the wall clock.
    pub fn notify(&mut self, message: impl AsRef<str>) {
        self.status = Some(format!(
            "[{}] {}",
            Local::now().format("%H:%M:%S"),
            message.as_ref()
        ));
    }

    /// Copy the user-adjustable settings onto `base` for saving.
    pub fn to_config(&self, base: &AppConfig) -> AppConfig {
        AppConfig {
            refresh_rate: self.refresh_rate,
            theme: self.theme().name.to_string(),
            graph_style: self.graph_style,
            show_graphs: self.show_graphs,
            sort_by: self.process.sort_key,
            tree_view: self.process.tree,
            panels: self.panels,
            ..base.clone()
        }
    }

    fn toggle_panel(&mut self, panel: Panel) {
        let flag = match panel {
            Panel::Cpu => &mut self.panels.cpu,
            Panel::Memory => &mut self.panels.memory,
            Panel::Network => &mut self.panels.network,
            Panel::Disk => &mut self.panels.disk,
            Panel::Gpu => &mut self.panels.gpu,
            Panel::Processes => &mut self.panels.processes,
        };
        *flag = !*flag;
        if !self.panels.processes {
            self.kill_prompt = None;
            self.process.cancel_search();
        }
    }

    fn set_refresh(&mut self, seconds: f64) {
        self.refresh_rate = clamp_refresh(seconds);
        let message = format!("Refresh interval {:.1}s", self.refresh_rate);
        self.notify(message);
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.process.move_up(1),
            Action::MoveDown => self.process.move_down(1),
            Action::PageUp => {
                let page = self.process.page();
                self.process.move_up(page);
            }
            Action::PageDown => {
                let page = self.process.page();
                self.process.move_down(page);
            }
            Action::Top => self.process.top(),
            Action::Bottom => self.process.bottom(),
            Action::StartSearch => {
                if self.panels.processes {
                    self.process.start_search();
                }
            }
            Action::SearchChar(c) => self.process.push_search(c),
            Action::SearchBackspace => self.process.pop_search(),
            Action::ConfirmSearch => self.process.confirm_search(),
            Action::CancelSearch => self.process.cancel_search(),
            Action::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else if self.kill_prompt.is_some() {
                    self.kill_prompt = None;
                } else if self.process.is_searching() {
                    self.process.cancel_search();
                } else {
                    self.process.clear_filter();
                }
            }
            Action::TogglePanel(panel) => self.toggle_panel(panel),
            Action::ToggleGraphs => self.show_graphs = !self.show_graphs,
            Action::ToggleTree => self.process.toggle_tree(),
            Action::CycleSort => self.process.cycle_sort(),
            Action::ReverseSort => self.process.reverse_sort(),
            Action::NextTheme => {
                self.theme_index = Theme::next_index(self.theme_index);
                let message = format!("Theme: {}", self.theme().display_name);
                self.notify(message);
            }
            Action::PrevTheme => {
                self.theme_index = Theme::prev_index(self.theme_index);
                let message = format!("Theme: {}", self.theme().display_name);
                self.notify(message);
            }
            Action::Faster => self.set_refresh(self.refresh_rate - REFRESH_STEP),
            Action::Slower => self.set_refresh(self.refresh_rate + REFRESH_STEP),
            Action::ResetView => {
                self.process.reset();
                self.panels = PanelConfig::default();
                self.show_help = false;
                self.kill_prompt = None;
                self.reset_requested = true;
                self.notify("View reset");
            }
            Action::RequestKill => {
                if !self.panels.processes {
                    return;
                }
                match self.process.selected_target.clone() {
                    Some(target) => self.kill_prompt = Some(target),
                    None => self.notify("No process selected"),
                }
            }
            Action::ConfirmKill => self.pending_kill = self.kill_prompt.take(),
            Action::CancelKill => self.kill_prompt = None,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::SaveConfig => self.save_requested = true,
            Action::Resize(cols, rows) => self.term_size = (cols, rows),
        }
    }
}

/// Pure transition: `state` after `action`.
pub fn apply(action: Action, mut state: UiState) -> UiState {
    state.update(action);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_REFRESH, MIN_REFRESH};
    use crate::process::SortKey;

    fn with_rows(count: usize) -> UiState {
        let mut state = UiState::default();
        state.process.sync(
            count,
            5,
            Some(KillTarget {
                pid: 42,
                name: "vim".into(),
            }),
        );
        state
    }

    #[test]
    fn navigation_clamps() {
        let state = with_rows(12);
        let state = apply(Action::PageDown, state);
        assert_eq!(state.process.selected, 5);
        let state = apply(Action::Bottom, state);
        assert_eq!(state.process.selected, 11);
        let state = apply(Action::MoveDown, state);
        assert_eq!(state.process.selected, 11);
        let state = apply(Action::Top, state);
        let state = apply(Action::MoveUp, state);
        assert_eq!(state.process.selected, 0);
    }

    #[test]
    fn refresh_steps_stay_in_range() {
        let mut state = UiState::default();
        for _ in 0..40 {
            state = apply(Action::Faster, state);
        }
        assert_eq!(state.refresh_rate, MIN_REFRESH);
        for _ in 0..40 {
            state = apply(Action::Slower, state);
        }
        assert_eq!(state.refresh_rate, MAX_REFRESH);
        assert!(state.status.as_deref().is_some_and(|s| s.contains("10.0s")));
    }

    #[test]
    fn theme_cycles_both_ways() {
        let state = UiState::default();
        let start = state.theme_index;
        let state = apply(Action::NextTheme, state);
        assert_ne!(state.theme_index, start);
        let state = apply(Action::PrevTheme, state);
        assert_eq!(state.theme_index, start);
        let state = apply(Action::PrevTheme, state);
        assert_eq!(state.theme_index, Theme::cycle().len() - 1);
    }

    #[test]
    fn kill_flow() {
        let state = apply(Action::RequestKill, with_rows(3));
        assert_eq!(state.kill_prompt.as_ref().map(|t| t.pid), Some(42));
        let state = apply(Action::ConfirmKill, state);
        assert!(state.kill_prompt.is_none());
        assert_eq!(state.pending_kill.map(|t| t.name), Some("vim".to_string()));

        let state = apply(Action::RequestKill, with_rows(3));
        let state = apply(Action::CancelKill, state);
        assert!(state.kill_prompt.is_none() && state.pending_kill.is_none());

        let state = apply(Action::RequestKill, UiState::default());
        assert!(state.kill_prompt.is_none());
        assert!(state.status.is_some());
    }

    #[test]
    fn cancel_unwinds_one_layer() {
        let mut state = UiState::default();
        state.process.filter = "ssh".into();
        state = apply(Action::ToggleHelp, state);
        state = apply(Action::Cancel, state);
        assert!(!state.show_help);
        assert_eq!(state.process.filter, "ssh");
        state = apply(Action::Cancel, state);
        assert!(state.process.filter.is_empty());
    }

    #[test]
    fn hiding_processes_closes_prompts() {
        let mut state = apply(Action::RequestKill, with_rows(3));
        state = apply(Action::StartSearch, state);
        state = apply(Action::TogglePanel(Panel::Processes), state);
        assert!(!state.panels.processes);
        assert!(state.kill_prompt.is_none());
        assert!(!state.process.is_searching());
        state = apply(Action::StartSearch, state);
        assert!(!state.process.is_searching());
    }

    #[test]
    fn reset_shows_hidden_panels() {
        let mut state = UiState::default();
        state = apply(Action::TogglePanel(Panel::Cpu), state);
        state = apply(Action::TogglePanel(Panel::Gpu), state);
        state = apply(Action::ToggleHelp, state);
        assert!(!state.panels.cpu && !state.panels.gpu);

        state = apply(Action::ResetView, state);
        assert!(state.panels.cpu);
        assert!(state.panels.gpu);
        assert!(!state.show_help);
        assert_eq!(state.panels, PanelConfig::default());
    }

    #[test]
    fn reset_and_save_are_requests() {
        let mut state = UiState::default();
        state.process.filter = "x".into();
        state = apply(Action::ResetView, state);
        assert!(state.reset_requested);
        assert!(state.process.filter.is_empty());
        state = apply(Action::SaveConfig, state);
        assert!(state.save_requested);
    }

    #[test]
    fn saved_config_reflects_view() {
        let mut state = UiState::default();
        state = apply(Action::CycleSort, state);
        state = apply(Action::ToggleTree, state);
        state = apply(Action::TogglePanel(Panel::Gpu), state);
        let config = state.to_config(&AppConfig::default());
        assert_eq!(config.sort_by, SortKey::Memory);
        assert!(config.tree_view);
        assert!(!config.panels.gpu);
        assert_eq!(config.max_cores, AppConfig::default().max_cores);
    }
}
