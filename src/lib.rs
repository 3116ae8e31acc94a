//! sysdash: a live, themed terminal dashboard for CPU, memory, disk,
//! network, GPU and processes.

pub mod action;
pub mod app;
pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod input;
pub mod layout;
pub mod process;
pub mod state;
pub mod theme;
pub mod tui;
pub mod utils;
pub mod widgets;

pub use app::{compose_frame, render_frame, render_once, App};
pub use error::{DashError, Result};
pub use state::{apply, UiState};
