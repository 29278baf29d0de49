//! Application state and main loop
//!
//! Translates key presses into session input tokens and keeps a message on
//! screen for its pause before accepting the next turn.

use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use super::terminal::Tui;
use super::ui;
use crate::config::{resolve_owner, PetConfig};
use crate::dispatch::Command;
use crate::git::CommitClock;
use crate::render::RenderContext;
use crate::session::{InputToken, Session};

/// Which screen is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Asking for the owner's name
    #[default]
    NamePrompt,
    /// Pet and menu
    Playing,
}

/// Main TUI application state
pub struct App {
    /// Should the app exit?
    pub should_quit: bool,
    /// Current screen
    pub mode: AppMode,
    /// Active session, once the owner is known
    pub session: Option<Session>,
    /// Theme, sprites and glitch rng for this run
    pub ctx: RenderContext,
    /// Startup notes (repository, last commit)
    pub banner: Vec<String>,

    /// Name prompt buffer
    pub input: String,
    /// Cursor position in input, in chars
    pub cursor: usize,

    config: PetConfig,
    clock: Box<dyn CommitClock>,
    /// Input is held back until this passes
    message_until: Option<Instant>,
    last_tick: Instant,
    farewell: Option<String>,
}

impl App {
    /// Tick rate for message deadlines
    const TICK_RATE: Duration = Duration::from_millis(50);

    pub fn new(
        config: PetConfig,
        ctx: RenderContext,
        clock: Box<dyn CommitClock>,
        banner: Vec<String>,
    ) -> Self {
        let mut app = Self {
            should_quit: false,
            mode: AppMode::NamePrompt,
            session: None,
            ctx,
            banner,
            input: String::new(),
            cursor: 0,
            config,
            clock,
            message_until: None,
            last_tick: Instant::now(),
            farewell: None,
        };

        if let Some(owner) = app.config.owner_name.clone() {
            app.start_session(&owner);
        }
        app
    }

    /// Run the main event loop
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            let timeout = Self::TICK_RATE.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.last_tick.elapsed() >= Self::TICK_RATE {
                self.on_tick(Instant::now());
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Goodbye text to print after the terminal is restored.
    pub fn farewell(&self) -> Option<&str> {
        self.farewell.as_deref()
    }

    /// Whether input is paused behind a message.
    pub fn is_paused(&self) -> bool {
        self.message_until.is_some()
    }

    fn draw(&mut self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::NamePrompt => self.handle_prompt_key(key),
            AppMode::Playing => self.handle_play_key(key),
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                let name = std::mem::take(&mut self.input);
                self.cursor = 0;
                self.start_session(&name);
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.cursor < self.input.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
            }
            _ => {}
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        // Messages hold the turn like a short sleep would.
        if self.is_paused() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if key.code == KeyCode::Char('q') {
            session.run_command(Command::Quit);
        } else if let Some(token) = token_for(key.code) {
            session.handle(token);
        } else {
            return;
        }

        if let Some(message) = session.message() {
            self.message_until = Some(Instant::now() + message.pause);
            if !session.is_running() {
                self.farewell = Some(message.text.clone());
            }
        }
    }

    /// Expire the current message; leave once the session has ended.
    pub fn on_tick(&mut self, now: Instant) {
        let Some(deadline) = self.message_until else {
            return;
        };
        if now < deadline {
            return;
        }

        self.message_until = None;
        if let Some(session) = self.session.as_mut() {
            session.clear_message();
            if !session.is_running() {
                self.should_quit = true;
            }
        }
    }

    fn start_session(&mut self, name: &str) {
        let owner = resolve_owner(Some(name));
        self.session = Some(Session::start(&self.config, owner, self.clock.as_ref()));
        self.mode = AppMode::Playing;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

/// Arrow keys plus vim-style letters.
fn token_for(code: KeyCode) -> Option<InputToken> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputToken::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputToken::Down),
        KeyCode::Right | KeyCode::Char('l') => Some(InputToken::Right),
        KeyCode::Left | KeyCode::Char('h') => Some(InputToken::Left),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputToken::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(InputToken::Back),
        _ => None,
    }
}
