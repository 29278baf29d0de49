//! The pet: state record, bounded stats and decay rules.

pub mod decay;
pub mod meter;
pub mod state;

pub use decay::{apply_decay, normalize_hours, DecayPolicy};
pub use meter::Meter;
pub use state::{Identity, Integrity, Memory, Mood, PetState, Trick};
