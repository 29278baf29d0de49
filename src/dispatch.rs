//! Interaction dispatcher
//!
//! Maps a [`Command`] (picked from the menu or typed in line mode) onto a
//! [`PetState`] mutation and reports what happened as an [`Outcome`].
//! Unknown input is an outcome too, never an error.

use std::fmt;
use std::time::Duration;

use crate::pet::{DecayPolicy, PetState, Trick};

/// Everything the pet can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Feed,
    Play,
    Dance,
    Sit,
    Sing,
    Status,
    /// Fast-forward decay by the configured number of hours.
    Decay,
    /// Restore file integrity.
    Repair,
    Quit,
}

impl Command {
    /// Commands offered in line mode, in display order.
    pub const PLAYABLE: [Command; 7] = [
        Command::Feed,
        Command::Play,
        Command::Dance,
        Command::Sit,
        Command::Sing,
        Command::Status,
        Command::Quit,
    ];

    /// Parse user text. Case and surrounding whitespace are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(trick) = input.parse::<Trick>() {
            return Some(trick.into());
        }
        match input.trim().to_lowercase().as_str() {
            "feed" => Some(Self::Feed),
            "play" => Some(Self::Play),
            "status" => Some(Self::Status),
            "decay" => Some(Self::Decay),
            "repair" => Some(Self::Repair),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Dance => "dance",
            Self::Sit => "sit",
            Self::Sing => "sing",
            Self::Status => "status",
            Self::Decay => "decay",
            Self::Repair => "repair",
            Self::Quit => "quit",
        }
    }

    /// The trick this command teaches, if any.
    pub fn trick(self) -> Option<Trick> {
        match self {
            Self::Dance => Some(Trick::Dance),
            Self::Sit => Some(Trick::Sit),
            Self::Sing => Some(Trick::Sing),
            _ => None,
        }
    }
}

impl From<Trick> for Command {
    fn from(trick: Trick) -> Self {
        match trick {
            Trick::Dance => Self::Dance,
            Trick::Sit => Self::Sit,
            Trick::Sing => Self::Sing,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a message should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Fed,
    Played,
    /// A trick was performed; `learned` is set only the first time.
    Trick { trick: Trick, learned: bool },
    Status { interactions: u64, tricks: Vec<Trick> },
    Decayed { hours: f64 },
    Repaired,
    Quit,
    Unrecognized { input: String },
}

impl Outcome {
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Quit)
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Fed | Self::Played | Self::Repaired => Tone::Success,
            Self::Trick { learned: true, .. } | Self::Status { .. } => Tone::Info,
            Self::Trick { learned: false, .. } => Tone::Success,
            Self::Decayed { .. } | Self::Quit => Tone::Warning,
            Self::Unrecognized { .. } => Tone::Danger,
        }
    }

    /// User-facing text for this outcome.
    pub fn message(&self, pet_name: &str) -> String {
        match self {
            Self::Fed => format!("🍖 {pet_name} is eating... nom nom! Health restored!"),
            Self::Played => format!("🎾 {pet_name} is playing! So much fun!"),
            Self::Trick { trick, learned: true } => format!("✨ {pet_name} learned to {trick}!"),
            Self::Trick { trick: Trick::Dance, .. } => format!("💃 {pet_name} dances gracefully!"),
            Self::Trick { trick: Trick::Sit, .. } => format!("🪑 {pet_name} sits down obediently!"),
            Self::Trick { trick: Trick::Sing, .. } => {
                format!("🎵 {pet_name} sings a beautiful song! ♪♫")
            }
            Self::Status { interactions, tricks } => {
                let known = if tricks.is_empty() {
                    "None yet".to_string()
                } else {
                    tricks
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("📊 Interactions: {interactions} | Tricks known: {known}")
            }
            Self::Decayed { hours } => format!("⏱️  Simulating {hours} hours of memory decay..."),
            Self::Repaired => "🛠️  Files restored. The art looks crisp again.".to_string(),
            Self::Quit => {
                "👋 Goodbye! Don't forget to commit to keep your pet's memory alive!".to_string()
            }
            Self::Unrecognized { .. } => {
                "❓ Unknown command! Try: feed, play, dance, sit, sing, status, quit".to_string()
            }
        }
    }

    /// How long the message stays up before the next turn.
    pub fn pause(&self, base: Duration) -> Duration {
        match self {
            Self::Quit => Duration::ZERO,
            Self::Status { .. } => base * 4 / 3,
            Self::Decayed { .. } | Self::Unrecognized { .. } => base * 2 / 3,
            _ => base,
        }
    }
}

/// Applies commands to the pet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionDispatcher {
    policy: DecayPolicy,
    simulate_hours: f64,
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new(DecayPolicy::default(), 10.0)
    }
}

impl InteractionDispatcher {
    pub fn new(policy: DecayPolicy, simulate_hours: f64) -> Self {
        Self {
            policy,
            simulate_hours,
        }
    }

    /// Parse `input` and dispatch it.
    pub fn dispatch_text(&self, pet: &mut PetState, input: &str) -> Outcome {
        match Command::parse(input) {
            Some(command) => self.dispatch(pet, command),
            None => {
                tracing::debug!(input, "unrecognized command");
                Outcome::Unrecognized {
                    input: input.trim().to_string(),
                }
            }
        }
    }

    pub fn dispatch(&self, pet: &mut PetState, command: Command) -> Outcome {
        tracing::debug!(%command, "dispatching");

        match command {
            Command::Feed => {
                pet.mood.happiness.shift(15.0);
                pet.mood.health.shift(10.0);
                pet.mood.hunger.shift(-20.0);
                pet.memory.bond_level.shift(3.0);
                pet.memory.name_clarity.shift(2.0);
                pet.memory.record_interaction();
                Outcome::Fed
            }
            Command::Play => {
                pet.mood.happiness.shift(20.0);
                pet.memory.bond_level.shift(5.0);
                pet.memory.name_clarity.shift(3.0);
                pet.memory.record_interaction();
                Outcome::Played
            }
            Command::Dance => Self::perform(pet, Trick::Dance),
            Command::Sit => Self::perform(pet, Trick::Sit),
            Command::Sing => Self::perform(pet, Trick::Sing),
            Command::Status => Outcome::Status {
                interactions: pet.memory.interaction_count(),
                tricks: pet.memory.tricks().to_vec(),
            },
            Command::Decay => {
                let hours = self.policy.apply(pet, self.simulate_hours);
                Outcome::Decayed { hours }
            }
            Command::Repair => {
                pet.integrity.reset();
                Outcome::Repaired
            }
            Command::Quit => Outcome::Quit,
        }
    }

    /// Trick deltas apply every time; only learning is one-off.
    fn perform(pet: &mut PetState, trick: Trick) -> Outcome {
        let learned = pet.memory.learn(trick);
        match trick {
            Trick::Dance => {
                pet.mood.happiness.shift(10.0);
                pet.memory.bond_level.shift(4.0);
            }
            Trick::Sing => pet.mood.happiness.shift(15.0),
            Trick::Sit => {}
        }
        pet.memory.record_interaction();

        if learned {
            tracing::info!(%trick, pet = pet.pet_name(), "learned a new trick");
        }
        Outcome::Trick { trick, learned }
    }
}
