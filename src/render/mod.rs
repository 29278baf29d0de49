//! Rendering helpers shared by the TUI and line mode.
//!
//! Nothing here mutates the pet or the menu. Everything the renderers need
//! beyond those two snapshots lives in a [`RenderContext`] built once per
//! session and passed down explicitly.

pub mod glitch;
pub mod sprites;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Color;

use crate::dispatch::{Outcome, Tone};
use crate::pet::{Meter, PetState, Trick};

pub use glitch::corrupt_text;
pub use sprites::SpriteSheet;

/// Cells in a progress bar.
pub const BAR_WIDTH: usize = 10;

/// Art is glitched above this corruption level.
pub const ART_GLITCH_ABOVE: f64 = 30.0;
/// The title is glitched above this corruption level.
pub const TITLE_GLITCH_ABOVE: f64 = 50.0;

pub const TITLE: &str = "╔═══ MEMORY PET ═══╗";

/// Color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::LightMagenta,
            secondary: Color::LightCyan,
            success: Color::LightGreen,
            warning: Color::LightYellow,
            danger: Color::LightRed,
            info: Color::LightBlue,
            dim: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Every slot set to the terminal default.
    pub fn monochrome() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            danger: Color::Reset,
            info: Color::Reset,
            dim: Color::Reset,
        }
    }

    pub fn for_color(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::monochrome()
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Info => self.info,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }
}

/// Face picked from the bond level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression {
    Happy,
    Neutral,
    Sad,
    Forgotten,
}

impl Expression {
    pub fn from_bond(bond: Meter) -> Self {
        let bond = bond.value();
        if bond > 70.0 {
            Self::Happy
        } else if bond > 40.0 {
            Self::Neutral
        } else if bond > 10.0 {
            Self::Sad
        } else {
            Self::Forgotten
        }
    }

    /// Sprite file stem for this expression.
    pub fn sprite_name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "regular",
            Self::Sad => "sadness",
            Self::Forgotten => "fear",
        }
    }
}

/// Per-session rendering state.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub theme: Theme,
    pub sprites: SpriteSheet,
    rng: StdRng,
}

impl RenderContext {
    pub fn new(theme: Theme, sprites: SpriteSheet) -> Self {
        Self {
            theme,
            sprites,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic glitches, for tests and snapshots.
    pub fn seeded(theme: Theme, sprites: SpriteSheet, seed: u64) -> Self {
        Self {
            theme,
            sprites,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The pet's art for its current bond, corrupted as files rot.
    pub fn pet_art(&mut self, pet: &PetState, pose: Option<&str>) -> String {
        let name =
            pose.unwrap_or_else(|| Expression::from_bond(pet.memory.bond_level).sprite_name());
        let frames = self.sprites.frames(name);
        let frame = frames
            .get(pet.memory.interaction_count() as usize % frames.len().max(1))
            .cloned()
            .unwrap_or_default();

        let corruption = pet.integrity.file_corruption().value();
        if corruption > ART_GLITCH_ABOVE {
            corrupt_text(&frame, corruption, &mut self.rng)
        } else {
            frame
        }
    }

    /// Header title, glitched once corruption is severe.
    pub fn title(&mut self, pet: &PetState) -> (String, Color) {
        let corruption = pet.integrity.file_corruption().value();
        if corruption > TITLE_GLITCH_ABOVE {
            (corrupt_text(TITLE, corruption, &mut self.rng), self.theme.danger)
        } else {
            (TITLE.to_string(), self.theme.primary)
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Theme::default(), SpriteSheet::builtin())
    }
}

/// Sprite to show instead of the mood face after a trick.
pub fn pose_for(outcome: &Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Trick { trick: Trick::Dance, .. } => Some("dance"),
        Outcome::Trick { trick: Trick::Sit, .. } => Some("sit"),
        _ => None,
    }
}

/// The stats panel: label, meter and bar color.
///
/// Happiness is colored by health; file integrity is always `info`.
pub fn stat_rows(pet: &PetState, theme: &Theme) -> [(&'static str, Meter, Color); 4] {
    let above_half = |m: Meter, good, bad| if m.value() > 50.0 { good } else { bad };
    [
        (
            "😊 Happiness",
            pet.mood.happiness,
            above_half(pet.mood.health, theme.success, theme.danger),
        ),
        (
            "💝 Bond Level",
            pet.memory.bond_level,
            above_half(pet.memory.bond_level, theme.success, theme.warning),
        ),
        (
            "🧠 Memory Clarity",
            pet.memory.name_clarity,
            above_half(pet.memory.name_clarity, theme.success, theme.danger),
        ),
        (
            "📁 File Integrity",
            pet.integrity.file_corruption().inverse(),
            theme.info,
        ),
    ]
}

/// `██████░░░░ 60%`
pub fn progress_bar(value: Meter) -> String {
    let filled = ((value.value() / Meter::MAX) * BAR_WIDTH as f64) as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        value.value() as u32
    )
}
