use crate::error::{DashError, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

/// Raw-mode, alternate-screen terminal the dashboard draws whole frames into.
pub struct Tui {
    stdout: Stdout,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        // Setup terminal
        enable_raw_mode().map_err(|e| DashError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(DashError::Terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self {
            stdout,
            active: true,
        })
    }

    /// Overwrite the screen with `lines`, clipped to `rows`.
    pub fn draw(&mut self, lines: &[String], rows: u16) -> Result<()> {
        for (row, line) in lines.iter().take(usize::from(rows)).enumerate() {
            // `row` is bounded by `rows`, which is a u16.
            queue!(
                self.stdout,
                MoveTo(0, row as u16),
                Clear(ClearType::UntilNewLine)
            )?;
            self.stdout.write_all(line.as_bytes())?;
        }
        let drawn = lines.len().min(usize::from(rows));
        if drawn < usize::from(rows) {
            queue!(
                self.stdout,
                MoveTo(0, drawn as u16),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        // Restore terminal
        disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Put the terminal back after a panic so the message is readable.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let mut stderr = io::stderr();
        execute!(stderr, LeaveAlternateScreen, Show).ok();
        default_hook(panic_info);
    }));
}
