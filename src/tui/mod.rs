//! Full-screen interface built on ratatui.
//!
//! - `app.rs` - session wrapper, key handling, event loop
//! - `terminal.rs` - raw mode / alternate screen guard
//! - `ui.rs` - layout and widgets

pub mod app;
pub mod terminal;
pub mod ui;

pub use app::{App, AppMode};

/// Run the TUI until the owner quits.
///
/// Returns the goodbye message, if any, to print once the alternate screen
/// is gone.
pub fn run(mut app: App) -> color_eyre::Result<Option<String>> {
    {
        let mut terminal = terminal::TerminalGuard::enter()?;
        app.run(&mut terminal)?;
    }
    Ok(app.farewell().map(str::to_string))
}
