//! Line mode
//!
//! A plain read-eval-print loop for terminals where the full-screen UI is
//! unwanted, and for piping commands in. Each line is one command; the
//! message pause is a real sleep.

use std::io::{self, BufRead, Write};
use std::thread;

use nu_ansi_term::{Color as AnsiColor, Style};
use ratatui::style::Color;
use unicode_width::UnicodeWidthStr;

use crate::config::{resolve_owner, PetConfig};
use crate::dispatch::Command;
use crate::git::CommitClock;
use crate::render::{pose_for, progress_bar, stat_rows, RenderContext};
use crate::session::{InputToken, Session};

const PROMPT: &str = "> ";

/// Line-mode front end over any reader and writer.
pub struct LineMode<R, W> {
    input: R,
    output: W,
    ctx: RenderContext,
    /// Sleep for message pauses; off in tests.
    sleep: bool,
}

impl<R: BufRead, W: Write> LineMode<R, W> {
    pub fn new(input: R, output: W, ctx: RenderContext) -> Self {
        Self {
            input,
            output,
            ctx,
            sleep: true,
        }
    }

    /// Skip the message pauses.
    #[must_use]
    pub fn without_pauses(mut self) -> Self {
        self.sleep = false;
        self
    }

    /// Play until the owner quits or input runs out.
    pub fn run(
        &mut self,
        config: &PetConfig,
        clock: &dyn CommitClock,
        banner: &[String],
    ) -> io::Result<Session> {
        let title = self.paint(
            "╔═══ WELCOME TO MEMORY PET ═══╗",
            self.ctx.theme.primary,
            true,
        );
        writeln!(self.output, "{title}")?;
        for note in banner {
            let note = self.paint(note, self.ctx.theme.dim, false);
            writeln!(self.output, "{note}")?;
        }
        writeln!(self.output)?;

        let owner = match &config.owner_name {
            Some(name) => resolve_owner(Some(name)),
            None => {
                let question = self.paint("What's your name? ", self.ctx.theme.secondary, false);
                write!(self.output, "{question}")?;
                self.output.flush()?;
                resolve_owner(self.read_line()?.as_deref())
            }
        };

        let mut session = Session::start(config, owner, clock);
        self.show(&session)?;

        while session.is_running() {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            match self.read_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => {
                    session.handle(InputToken::Text(line));
                }
                None => {
                    tracing::debug!("input closed");
                    session.run_command(Command::Quit);
                }
            }

            if let Some(message) = session.message().cloned() {
                let text = self.paint(&message.text, self.ctx.theme.tone(message.tone), true);
                writeln!(self.output, "\n{text}\n")?;
                if let Some(pose) = pose_for(&message.outcome) {
                    let art = self.ctx.pet_art(session.pet(), Some(pose));
                    writeln!(self.output, "{art}")?;
                }
                self.output.flush()?;
                if self.sleep && !message.pause.is_zero() {
                    thread::sleep(message.pause);
                }
                session.clear_message();
            }

            if session.is_running() {
                self.show(&session)?;
            }
        }

        Ok(session)
    }

    /// Art, greeting, meters and the command list.
    fn show(&mut self, session: &Session) -> io::Result<()> {
        let pet = session.pet();
        let theme = self.ctx.theme;

        let (title, color) = self.ctx.title(pet);
        let title = self.paint(&title, color, true);
        writeln!(self.output, "{title}")?;

        let art = self.ctx.pet_art(pet, None);
        writeln!(self.output, "{art}")?;

        let greeting = format!("🦆 {} greets: '{}'", pet.pet_name(), pet.display_name());
        let greeting = self.paint(&greeting, theme.info, false);
        writeln!(self.output, "{greeting}\n")?;

        let rows = stat_rows(pet, &theme);
        let label_width = rows.iter().map(|r| r.0.width()).max().unwrap_or(0);
        for (label, value, color) in rows {
            let pad = " ".repeat(label_width - label.width());
            let bar = self.paint(&progress_bar(value), color, false);
            writeln!(self.output, "{label}{pad}  {bar}")?;
        }

        let commands = Command::PLAYABLE
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" | ");
        let commands = self.paint(&format!("Commands: {commands}"), theme.dim, false);
        writeln!(self.output, "\n{commands}")?;
        Ok(())
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        let Some(color) = ansi(color) else {
            return text.to_string();
        };
        let mut style = Style::new().fg(color);
        if bold {
            style = style.bold();
        }
        style.paint(text).to_string()
    }
}

/// ratatui palette entry to the nearest ANSI color; `None` for the default.
fn ansi(color: Color) -> Option<AnsiColor> {
    let ansi = match color {
        Color::Reset => return None,
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Magenta => AnsiColor::Purple,
        Color::Cyan => AnsiColor::Cyan,
        Color::Gray => AnsiColor::LightGray,
        Color::DarkGray => AnsiColor::DarkGray,
        Color::LightRed => AnsiColor::LightRed,
        Color::LightGreen => AnsiColor::LightGreen,
        Color::LightYellow => AnsiColor::LightYellow,
        Color::LightBlue => AnsiColor::LightBlue,
        Color::LightMagenta => AnsiColor::LightPurple,
        Color::LightCyan => AnsiColor::LightCyan,
        Color::White => AnsiColor::White,
        Color::Rgb(r, g, b) => AnsiColor::Rgb(r, g, b),
        Color::Indexed(i) => AnsiColor::Fixed(i),
    };
    Some(ansi)
}
