//! Pet state record
//!
//! One fixed-shape record per session. Bounded stats are [`Meter`]s, so the
//! 0–100 range holds after any mutation; the remaining invariants (unique
//! tricks, monotonic counters, corruption only growing) are kept by routing
//! writes through the methods below.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meter::Meter;

/// Placeholder glyph used when the pet half-remembers a name.
pub const MASK_GLYPH: char = '?';
/// What the pet calls an owner it no longer recognizes.
pub const STRANGER: &str = "stranger";
/// What the pet calls an owner once identity is fully lost.
pub const IDENTITY_LOST: &str = "???";

const CLEAR_ABOVE: f64 = 70.0;
const MASKED_ABOVE: f64 = 40.0;
const STRANGER_ABOVE: f64 = 10.0;

/// A learnable trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trick {
    Dance,
    Sit,
    Sing,
}

impl Trick {
    pub const ALL: [Trick; 3] = [Trick::Dance, Trick::Sit, Trick::Sing];

    pub fn name(self) -> &'static str {
        match self {
            Trick::Dance => "dance",
            Trick::Sit => "sit",
            Trick::Sing => "sing",
        }
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trick {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trick::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Who the pet is and who it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub pet_name: String,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
}

/// Decorative wellbeing stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub happiness: Meter,
    pub hunger: Meter,
    pub health: Meter,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            happiness: Meter::FULL,
            hunger: Meter::EMPTY,
            health: Meter::FULL,
        }
    }
}

/// What the pet remembers about its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub bond_level: Meter,
    pub name_clarity: Meter,
    interaction_count: u64,
    learned_tricks: Vec<Trick>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            bond_level: Meter::FULL,
            name_clarity: Meter::FULL,
            interaction_count: 0,
            learned_tricks: Vec::new(),
        }
    }
}

impl Memory {
    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    pub fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Tricks in the order they were learned.
    pub fn tricks(&self) -> &[Trick] {
        &self.learned_tricks
    }

    pub fn knows(&self, trick: Trick) -> bool {
        self.learned_tricks.contains(&trick)
    }

    /// Append `trick` unless already known. Returns `true` the first time.
    pub fn learn(&mut self, trick: Trick) -> bool {
        if self.knows(trick) {
            return false;
        }
        self.learned_tricks.push(trick);
        true
    }
}

/// The owner's side of the bargain: simulated file decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Integrity {
    file_corruption: Meter,
    pub history_intact: bool,
    pub art_quality: Meter,
}

impl Default for Integrity {
    fn default() -> Self {
        Self {
            file_corruption: Meter::EMPTY,
            history_intact: true,
            art_quality: Meter::FULL,
        }
    }
}

impl Integrity {
    pub fn file_corruption(&self) -> Meter {
        self.file_corruption
    }

    /// Raise corruption. Negative amounts are ignored; use [`Integrity::reset`].
    pub fn corrupt(&mut self, amount: f64) {
        if amount > 0.0 {
            self.file_corruption.shift(amount);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The whole pet, created once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    pub identity: Identity,
    pub mood: Mood,
    pub memory: Memory,
    pub integrity: Integrity,
}

impl PetState {
    pub fn new(owner_name: impl Into<String>, pet_name: impl Into<String>) -> Self {
        Self::born_at(owner_name, pet_name, Utc::now())
    }

    pub fn born_at(
        owner_name: impl Into<String>,
        pet_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: Identity {
                pet_name: pet_name.into(),
                owner_name: owner_name.into(),
                created_at,
            },
            mood: Mood::default(),
            memory: Memory::default(),
            integrity: Integrity::default(),
        }
    }

    pub fn pet_name(&self) -> &str {
        &self.identity.pet_name
    }

    /// What the pet calls its owner, degrading with `name_clarity`.
    pub fn display_name(&self) -> String {
        let clarity = self.memory.name_clarity.value();
        let owner = &self.identity.owner_name;

        if clarity > CLEAR_ABOVE {
            owner.clone()
        } else if clarity > MASKED_ABOVE {
            mask_name(owner)
        } else if clarity > STRANGER_ABOVE {
            STRANGER.to_string()
        } else {
            IDENTITY_LOST.to_string()
        }
    }
}

/// Replace characters at even positions with [`MASK_GLYPH`].
fn mask_name(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| if i % 2 == 0 { MASK_GLYPH } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pet_with_clarity(owner: &str, clarity: f64) -> PetState {
        let mut pet = PetState::new(owner, "Buddy");
        pet.memory.name_clarity = Meter::new(clarity);
        pet
    }

    #[test]
    fn test_initial_values() {
        let pet = PetState::new("Sam", "Buddy");
        assert_eq!(pet.mood.happiness, Meter::FULL);
        assert_eq!(pet.mood.health, Meter::FULL);
        assert_eq!(pet.mood.hunger, Meter::EMPTY);
        assert_eq!(pet.memory.bond_level, Meter::FULL);
        assert_eq!(pet.memory.name_clarity, Meter::FULL);
        assert_eq!(pet.memory.interaction_count(), 0);
        assert!(pet.memory.tricks().is_empty());
        assert_eq!(pet.integrity.file_corruption(), Meter::EMPTY);
        assert!(pet.integrity.history_intact);
        assert_eq!(pet.integrity.art_quality, Meter::FULL);
    }

    #[rstest]
    #[case(80.0, "Sam")]
    #[case(70.1, "Sam")]
    #[case(70.0, "?a?")]
    #[case(55.0, "?a?")]
    #[case(40.0, "stranger")]
    #[case(25.0, "stranger")]
    #[case(10.0, "???")]
    #[case(5.0, "???")]
    fn test_display_name_thresholds(#[case] clarity: f64, #[case] expected: &str) {
        assert_eq!(pet_with_clarity("Sam", clarity).display_name(), expected);
    }

    #[test]
    fn test_mask_is_deterministic_and_char_based() {
        assert_eq!(mask_name("Alexandra"), "?l?x?n?r?");
        assert_eq!(mask_name("Zoë"), "?o?");
        assert_eq!(mask_name(""), "");
        assert_eq!(mask_name("Alexandra"), mask_name("Alexandra"));
    }

    #[test]
    fn test_learn_trick_once() {
        let mut memory = Memory::default();
        assert!(memory.learn(Trick::Sing));
        assert!(memory.learn(Trick::Dance));
        assert!(!memory.learn(Trick::Sing));
        assert_eq!(memory.tricks(), &[Trick::Sing, Trick::Dance]);
    }

    #[test]
    fn test_corruption_only_grows_until_reset() {
        let mut integrity = Integrity::default();
        integrity.corrupt(30.0);
        integrity.corrupt(-10.0);
        assert_eq!(integrity.file_corruption().value(), 30.0);

        integrity.history_intact = false;
        integrity.reset();
        assert_eq!(integrity, Integrity::default());
    }

    #[test]
    fn test_trick_parsing() {
        assert_eq!("DANCE".parse::<Trick>(), Ok(Trick::Dance));
        assert_eq!(" sit ".parse::<Trick>(), Ok(Trick::Sit));
        assert!("roll".parse::<Trick>().is_err());
    }
}
