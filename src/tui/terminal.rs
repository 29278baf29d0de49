//! Raw mode and the alternate screen
//!
//! [`TerminalGuard`] owns the ratatui terminal and puts the user's terminal
//! back on drop, so early returns and `?` inside the loop leave it usable. A
//! panic hook does the same for crashes.

use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};
use std::panic;
use std::sync::Once;

use color_eyre::Result;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static HOOK: Once = Once::new();

/// A terminal in raw mode on the alternate screen.
pub struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        HOOK.call_once(|| {
            let _ = color_eyre::install();
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                leave();
                previous(info);
            }));
        });

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        set_title("Memory Pet");
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = Tui;

    fn deref(&self) -> &Tui {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        leave();
    }
}

/// Best effort; there is nowhere to report a failure at this point.
fn leave() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// OSC 0 window title.
fn set_title(title: &str) {
    let mut out = io::stdout();
    let _ = write!(out, "\x1b]0;{title}\x1b\\");
    let _ = out.flush();
}
