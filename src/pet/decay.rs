//! Time-driven memory decay.
//!
//! Decay is a one-directional drift: the pet forgets (clarity and bond fall)
//! and the owner's files rot (corruption rises). Bounds are absorbing, so a
//! saturated field stays put no matter how many more hours pass.

use serde::{Deserialize, Serialize};

use super::state::PetState;

/// Per-hour decay rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayPolicy {
    pub clarity_per_hour: f64,
    pub bond_per_hour: f64,
    pub corruption_per_hour: f64,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            clarity_per_hour: 5.0,
            bond_per_hour: 3.0,
            corruption_per_hour: 4.0,
        }
    }
}

impl DecayPolicy {
    /// Apply `hours_elapsed` of decay to `state`. Returns the hours actually
    /// applied after normalization (negative or NaN input counts as zero).
    pub fn apply(&self, state: &mut PetState, hours_elapsed: f64) -> f64 {
        let hours = normalize_hours(hours_elapsed);
        if hours == 0.0 {
            return 0.0;
        }

        state.memory.name_clarity.shift(-drift(hours, self.clarity_per_hour));
        state.memory.bond_level.shift(-drift(hours, self.bond_per_hour));
        state.integrity.corrupt(drift(hours, self.corruption_per_hour));

        tracing::debug!(
            hours,
            clarity = state.memory.name_clarity.value(),
            bond = state.memory.bond_level.value(),
            corruption = state.integrity.file_corruption().value(),
            "applied decay"
        );

        hours
    }
}

/// Apply decay with the default rates.
pub fn apply_decay(state: &mut PetState, hours_elapsed: f64) -> f64 {
    DecayPolicy::default().apply(state, hours_elapsed)
}

/// Clamp bad time input to zero. Infinity is kept; clamping absorbs it.
pub fn normalize_hours(hours: f64) -> f64 {
    if hours.is_nan() || hours < 0.0 {
        0.0
    } else {
        hours
    }
}

/// Non-negative change over `hours`. A zero, negative or NaN rate never
/// drifts, even over infinite hours.
fn drift(hours: f64, per_hour: f64) -> f64 {
    if per_hour.is_nan() || per_hour <= 0.0 {
        0.0
    } else {
        hours * per_hour
    }
}
