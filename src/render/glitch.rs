//! Glitch effect for corrupted files.

use rand::Rng;

/// Replacement glyphs.
pub const GLYPHS: [char; 6] = ['?', '█', '▓', '░', '*', '#'];

/// Below this level text is left alone.
pub const GLITCH_THRESHOLD: f64 = 20.0;

/// Replace characters with random glyphs, each with probability `level / 200`.
/// Spaces and newlines survive so the shape of the art holds.
pub fn corrupt_text<R: Rng + ?Sized>(text: &str, level: f64, rng: &mut R) -> String {
    if level.is_nan() || level < GLITCH_THRESHOLD {
        return text.to_string();
    }
    let chance = (level / 200.0).clamp(0.0, 1.0);

    text.chars()
        .map(|c| {
            if c == ' ' || c == '\n' || !rng.random_bool(chance) {
                c
            } else {
                GLYPHS[rng.random_range(0..GLYPHS.len())]
            }
        })
        .collect()
}
