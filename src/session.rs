//! One interactive session.
//!
//! Owns the pet, the menu and the dispatcher. Each [`InputToken`] is handled
//! to completion before the next is accepted; nothing mutates the pet in the
//! background.

use std::time::Duration;

use crate::config::PetConfig;
use crate::dispatch::{Command, InteractionDispatcher, Outcome, Tone};
use crate::git::CommitClock;
use crate::menu::{MenuLayout, MenuStateMachine};
use crate::pet::{DecayPolicy, PetState};

/// One discrete input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputToken {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    /// Raw command text, e.g. from line mode.
    Text(String),
}

/// Feedback shown after a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
    pub pause: Duration,
    pub outcome: Outcome,
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub outcome: Option<Outcome>,
    pub running: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    pet: PetState,
    menu: MenuStateMachine,
    dispatcher: InteractionDispatcher,
    pause: Duration,
    running: bool,
    message: Option<Message>,
    startup_decay: f64,
}

impl Session {
    /// Create the pet for `owner` and apply decay for the hours reported by `clock`.
    pub fn start(config: &PetConfig, owner: impl Into<String>, clock: &dyn CommitClock) -> Self {
        let pet = PetState::new(owner, config.pet_name.clone());
        let dispatcher = InteractionDispatcher::new(config.decay, config.simulate_hours);
        let mut session = Self::from_parts(
            pet,
            MenuStateMachine::new(MenuLayout::default()),
            dispatcher,
            config.message_pause(),
        );
        session.startup_decay = config
            .decay
            .apply(&mut session.pet, clock.hours_since_last_commit());

        tracing::info!(
            pet = session.pet.pet_name(),
            owner = %session.pet.identity.owner_name,
            hours = session.startup_decay,
            "session started"
        );
        session
    }

    pub fn from_parts(
        pet: PetState,
        menu: MenuStateMachine,
        dispatcher: InteractionDispatcher,
        pause: Duration,
    ) -> Self {
        Self {
            pet,
            menu,
            dispatcher,
            pause,
            running: true,
            message: None,
            startup_decay: 0.0,
        }
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn menu(&self) -> &MenuStateMachine {
        &self.menu
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hours of decay applied when the session started.
    pub fn startup_decay(&self) -> f64 {
        self.startup_decay
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Process one input.
    pub fn handle(&mut self, token: InputToken) -> Turn {
        if !self.running {
            return Turn {
                outcome: None,
                running: false,
            };
        }

        let outcome = match token {
            InputToken::Up => {
                self.menu.navigate_up();
                None
            }
            InputToken::Down => {
                self.menu.navigate_down();
                None
            }
            InputToken::Right => {
                self.menu.navigate_right();
                None
            }
            InputToken::Left | InputToken::Back => {
                self.menu.navigate_left();
                None
            }
            InputToken::Confirm => self
                .menu
                .select()
                .map(|command| self.dispatcher.dispatch(&mut self.pet, command)),
            InputToken::Text(text) => Some(self.dispatcher.dispatch_text(&mut self.pet, &text)),
        };

        if let Some(outcome) = &outcome {
            self.record(outcome);
        }

        Turn {
            outcome,
            running: self.running,
        }
    }

    /// Dispatch a command directly, bypassing the menu.
    pub fn run_command(&mut self, command: Command) -> Outcome {
        let outcome = self.dispatcher.dispatch(&mut self.pet, command);
        self.record(&outcome);
        outcome
    }

    fn record(&mut self, outcome: &Outcome) {
        if outcome.ends_session() {
            tracing::info!(
                interactions = self.pet.memory.interaction_count(),
                "session ending"
            );
            self.running = false;
        }
        self.message = Some(Message {
            text: outcome.message(self.pet.pet_name()),
            tone: outcome.tone(),
            pause: outcome.pause(self.pause),
            outcome: outcome.clone(),
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_parts(
            PetState::new(crate::config::DEFAULT_OWNER, "Buddy"),
            MenuStateMachine::default(),
            InteractionDispatcher::new(DecayPolicy::default(), 10.0),
            Duration::ZERO,
        )
    }
}
