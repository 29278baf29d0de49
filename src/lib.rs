//! # Memory Pet
//!
//! A terminal pet whose memory of its owner fades between git commits.
//! Inactivity lowers the bond, blurs the owner's name and corrupts the pet's
//! art; feeding, playing and teaching tricks bring it back.
//!
//! The library holds the model (`pet`), the menu and command layers, the
//! session that ties them together, and two front ends: a ratatui full-screen
//! UI (`tui`) and a line mode (`plain`).

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod git;
pub mod menu;
pub mod pet;
pub mod plain;
pub mod render;
pub mod session;
pub mod tui;

pub use config::PetConfig;
pub use dispatch::{Command, InteractionDispatcher, Outcome};
pub use errors::{PetError, Result};
pub use git::{CommitClock, FixedClock, GitRepo};
pub use menu::{MenuStateMachine, Pane};
pub use pet::{DecayPolicy, Meter, PetState, Trick};
pub use session::{InputToken, Session};
