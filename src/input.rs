use crate::{
    action::{Action, Panel},
    state::UiState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// How long the reader blocks per poll before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which keymap applies. Published by the app loop after every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    KillConfirm,
}

impl From<&UiState> for InputMode {
    fn from(state: &UiState) -> Self {
        if state.kill_prompt.is_some() {
            InputMode::KillConfirm
        } else if state.process.is_searching() {
            InputMode::Search
        } else {
            InputMode::Normal
        }
    }
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    // Ignore key release events to avoid double-handling keys like Esc.
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::KillConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmKill),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CancelKill),
            _ => None,
        },
        InputMode::Search => match key.code {
            KeyCode::Esc => Some(Action::CancelSearch),
            KeyCode::Enter => Some(Action::ConfirmSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Action::SearchChar(c))
            }
            _ => None,
        },
        InputMode::Normal => normal_key(key.code),
    }
}

fn normal_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('K') => Action::RequestKill,
        KeyCode::Char('1') => Action::TogglePanel(Panel::Cpu),
        KeyCode::Char('2') => Action::TogglePanel(Panel::Memory),
        KeyCode::Char('3') => Action::TogglePanel(Panel::Network),
        KeyCode::Char('4') => Action::TogglePanel(Panel::Disk),
        KeyCode::Char('5') => Action::TogglePanel(Panel::Gpu),
        KeyCode::Char('p') => Action::TogglePanel(Panel::Processes),
        KeyCode::Char('h') => Action::ToggleGraphs,
        KeyCode::Char('t') => Action::ToggleTree,
        KeyCode::Char('s') => Action::CycleSort,
        KeyCode::Char('i') => Action::ReverseSort,
        KeyCode::Char('c') => Action::NextTheme,
        KeyCode::Char('C') => Action::PrevTheme,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Faster,
        KeyCode::Char('-') => Action::Slower,
        KeyCode::Char('r') => Action::ResetView,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('w') => Action::SaveConfig,
        _ => return None,
    };
    Some(action)
}

pub fn map_event(event: &Event, mode: InputMode) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(*key, mode),
        Event::Resize(cols, rows) => Some(Action::Resize(*cols, *rows)),
        _ => None,
    }
}

/// Read terminal events on a blocking thread and forward them as actions.
///
/// The thread exits once the receiving side of `tx` is dropped or the
/// terminal stops delivering events.
pub fn spawn_reader(tx: mpsc::Sender<Action>, mode: watch::Receiver<InputMode>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "event poll failed, stopping input reader");
                    break;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "event read failed, stopping input reader");
                    break;
                }
            };
            let current = *mode.borrow();
            if let Some(action) = map_event(&event, current) {
                if tx.blocking_send(action).is_err() {
                    break;
                }
            }
        }
        tracing::debug!("input reader stopped");
    })
}
