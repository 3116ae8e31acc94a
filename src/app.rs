use crate::{
    action::Action,
    components::{
        help::HELP_WIDTH, Component, CpuPanel, DiskPanel, GpuPanel, HelpPanel, MemoryPanel,
        NetworkPanel, PanelStyle, ProcessPanel, ProcessRender, RenderContext,
    },
    config::AppConfig,
    data::{history::SystemHistory, snapshot::SystemSnapshot, Collector},
    error::Result,
    input::{self, InputMode},
    layout::{
        combine_rows, footer_lines, header_line, is_too_small, terminal_size, too_small_message,
        Layout, MARGIN, PANEL_GAP,
    },
    process::signal,
    state::UiState,
    theme::Theme,
    tui::Tui,
};
use std::{path::PathBuf, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    time::{sleep_until, Instant},
};

const ACTION_CHANNEL_CAPACITY: usize = 64;
/// Gap between the two samples of a one-shot render, so rates and CPU
/// usage have something to diff against.
const ONE_SHOT_GAP: Duration = Duration::from_millis(100);

/// A composed frame and the process table geometry it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub process: Option<ProcessRender>,
}

fn shown(visible: bool, render: impl FnOnce() -> Vec<String>) -> Vec<String> {
    if visible {
        render()
    } else {
        Vec::new()
    }
}

fn push_row(lines: &mut Vec<String>, panels: &[Vec<String>]) {
    let combined = combine_rows(panels, PANEL_GAP);
    if combined.is_empty() {
        return;
    }
    lines.extend(combined.into_iter().map(|line| format!("{MARGIN}{line}")));
    lines.push(String::new());
}

/// Lay out every visible panel for the state's terminal size.
pub fn compose_frame(
    snapshot: &SystemSnapshot,
    history: &SystemHistory,
    state: &UiState,
    theme: &Theme,
) -> Frame {
    let (cols, rows) = state.term_size;
    if is_too_small(cols, rows) {
        return Frame {
            lines: too_small_message(cols, rows, theme),
            process: None,
        };
    }

    let layout = Layout::new(cols, rows);
    let display = state.display;
    let style = PanelStyle {
        width: layout.panel_width,
        graph_height: layout.graph_height,
        graph_style: state.graph_style,
        show_graphs: state.show_graphs,
        unicode: display.unicode,
    };
    let ctx = RenderContext::new(snapshot, history, theme, style);
    let compact = ctx.with_style(style.with_graph_height(layout.compact_graph_height()));

    let mut lines = vec![header_line(snapshot, theme, layout.cols), String::new()];

    if state.show_help {
        let indent = " ".repeat(layout.cols.saturating_sub(HELP_WIDTH) / 2);
        lines.extend(
            HelpPanel
                .render(&ctx)
                .into_iter()
                .map(|line| format!("{indent}{line}")),
        );
        lines.push(String::new());
        lines.extend(footer_lines(state, theme, layout.cols));
        return Frame {
            lines,
            process: None,
        };
    }

    let panels = state.panels;

    push_row(
        &mut lines,
        &[
            shown(panels.cpu, || CpuPanel::new(display.max_cores).render(&ctx)),
            shown(panels.memory, || MemoryPanel.render(&ctx)),
        ],
    );

    let gpu = shown(panels.gpu, || GpuPanel::new(display.temp_unit).render(&compact));
    let network = shown(panels.network, || {
        NetworkPanel::new(display.max_interfaces).render(&ctx)
    });
    let disk = shown(panels.disk, || DiskPanel::new(display.max_disks).render(&compact));
    if layout.fits_side_by_side(3) {
        push_row(&mut lines, &[gpu, network, disk]);
    } else {
        push_row(&mut lines, &[gpu, network]);
        push_row(&mut lines, &[disk]);
    }

    let process = panels.processes.then(|| {
        ProcessPanel::new(&state.process, layout.process_width, layout.process_height)
            .with_kill_prompt(state.kill_prompt.as_ref())
            .render_rows(&ctx)
    });
    if let Some(table) = &process {
        lines.extend(table.lines.iter().map(|line| format!("{MARGIN}{line}")));
    }

    lines.extend(footer_lines(state, theme, layout.cols));
    Frame { lines, process }
}

/// The whole dashboard as one string, lines joined by `\n`.
pub fn render_frame(
    snapshot: &SystemSnapshot,
    history: &SystemHistory,
    state: &UiState,
    theme: &Theme,
) -> String {
    compose_frame(snapshot, history, state, theme).lines.join("\n")
}

/// Sample twice, a short gap apart, and render a single frame.
pub fn render_once<C: Collector>(collector: &mut C, config: &AppConfig, size: (u16, u16)) -> String {
    let mut history = SystemHistory::new(config.history_size);
    let first = collector.snapshot(config.max_processes);
    history.record(&first);
    std::thread::sleep(ONE_SHOT_GAP);
    let snapshot = collector.snapshot(config.max_processes);
    history.record(&snapshot);

    let state = UiState::from_config(config, size);
    render_frame(&snapshot, &history, &state, &state.theme())
}

pub struct App<C> {
    collector: C,
    config: AppConfig,
    config_path: Option<PathBuf>,
    history: SystemHistory,
    snapshot: SystemSnapshot,
    pub state: UiState,
    ticks: u64,
    refresh_processes: bool,
}

impl<C: Collector> App<C> {
    pub fn new(collector: C, config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let state = UiState::from_config(&config, terminal_size());
        Self {
            collector,
            history: SystemHistory::new(config.history_size),
            snapshot: SystemSnapshot::default(),
            state,
            config,
            config_path,
            ticks: 0,
            refresh_processes: true,
        }
    }

    fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.state.refresh_rate)
    }

    /// Collect one snapshot and feed it to the history. Processes are only
    /// enumerated every `process_update_interval` ticks.
    pub fn tick(&mut self) {
        let every = u64::from(self.config.process_update_interval.max(1));
        let refresh = self.refresh_processes || self.ticks % every == 0;
        let mut snapshot = self
            .collector
            .sample(refresh.then_some(self.config.max_processes));
        if !refresh {
            snapshot.processes = std::mem::take(&mut self.snapshot.processes);
        }
        self.history.record(&snapshot);
        self.snapshot = snapshot;
        self.ticks += 1;
        self.refresh_processes = false;
    }

    /// Render from the cached snapshot and sync the process view to it.
    pub fn frame(&mut self) -> Vec<String> {
        let theme = self.state.theme();
        let frame = compose_frame(&self.snapshot, &self.history, &self.state, &theme);
        if let Some(table) = frame.process {
            self.state
                .process
                .sync(table.row_count, table.body_rows, table.target);
        }
        frame.lines
    }

    /// Apply `action` and carry out whatever it requested.
    pub fn handle_action(&mut self, action: Action) {
        tracing::debug!(?action, "action");
        self.state.update(action);

        if self.state.reset_requested {
            self.state.reset_requested = false;
            self.history.clear();
        }
        if let Some(target) = self.state.pending_kill.take() {
            let message = signal::terminate(&target);
            self.state.notify(message);
            self.refresh_processes = true;
        }
        if self.state.save_requested {
            self.state.save_requested = false;
            self.save_config();
        }
    }

    fn save_config(&mut self) {
        let config = self.state.to_config(&self.config);
        match config.save(self.config_path.as_deref()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "config saved");
                self.state.notify(format!("Config saved to {}", path.display()));
                self.config = config;
            }
            Err(err) => {
                tracing::warn!(error = %err, "config save failed");
                self.state.notify(format!("Save failed: {err}"));
            }
        }
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let lines = self.frame();
        tui.draw(&lines, self.state.term_size.1)
    }

    pub async fn run(mut self, mut tui: Tui) -> Result<()> {
        let (tx, mut rx) = mpsc::channel(ACTION_CHANNEL_CAPACITY);
        let (mode_tx, mode_rx) = watch::channel(InputMode::Normal);
        let reader = input::spawn_reader(tx, mode_rx);
        tracing::info!(interval = self.state.refresh_rate, "dashboard started");

        let result = self.event_loop(&mut tui, &mut rx, &mode_tx).await;

        drop(rx);
        if let Err(err) = reader.await {
            tracing::warn!(error = %err, "input reader panicked");
        }
        tui.exit()?;
        tracing::info!("dashboard stopped");
        result
    }

    async fn event_loop(
        &mut self,
        tui: &mut Tui,
        rx: &mut mpsc::Receiver<Action>,
        mode_tx: &watch::Sender<InputMode>,
    ) -> Result<()> {
        while !self.state.should_quit {
            let tick_started = Instant::now();
            self.tick();
            self.draw(tui)?;

            loop {
                let deadline = tick_started + self.interval();
                tokio::select! {
                    _ = sleep_until(deadline) => break,
                    action = rx.recv() => {
                        let Some(action) = action else {
                            self.state.should_quit = true;
                            break;
                        };
                        let resized = matches!(action, Action::Resize(..));
                        self.handle_action(action);
                        mode_tx.send_replace(InputMode::from(&self.state));
                        if self.state.should_quit {
                            break;
                        }
                        if resized {
                            tui.clear()?;
                        }
                        self.draw(tui)?;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("interrupted");
                        self.state.should_quit = true;
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
