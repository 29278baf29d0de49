//! Bounded 0–100 stat value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stat clamped to `[0, 100]`.
///
/// Every constructor and mutator clamps, so a `Meter` can never be observed
/// out of range. NaN collapses to the floor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Meter(f64);

impl Meter {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub const EMPTY: Meter = Meter(Self::MIN);
    pub const FULL: Meter = Meter(Self::MAX);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::EMPTY;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Add `delta` (which may be negative) and clamp.
    pub fn shift(&mut self, delta: f64) {
        *self = Self::new(self.0 + delta);
    }

    /// Rounded integer percentage for display.
    pub fn percent(self) -> u16 {
        self.0.round() as u16
    }

    pub fn is_full(self) -> bool {
        self.0 >= Self::MAX
    }

    pub fn is_empty(self) -> bool {
        self.0 <= Self::MIN
    }

    /// `100 - value`, e.g. file integrity from corruption.
    pub fn inverse(self) -> Self {
        Self::new(Self::MAX - self.0)
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f64> for Meter {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Meter> for f64 {
    fn from(meter: Meter) -> Self {
        meter.0
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_both_directions() {
        assert_eq!(Meter::new(150.0), Meter::FULL);
        assert_eq!(Meter::new(-3.5), Meter::EMPTY);
        assert_eq!(Meter::new(42.0).value(), 42.0);
    }

    #[test]
    fn test_nan_and_infinity() {
        assert_eq!(Meter::new(f64::NAN), Meter::EMPTY);
        assert_eq!(Meter::new(f64::INFINITY), Meter::FULL);
        assert_eq!(Meter::new(f64::NEG_INFINITY), Meter::EMPTY);
    }

    #[test]
    fn test_shift() {
        let mut m = Meter::new(95.0);
        m.shift(15.0);
        assert_eq!(m, Meter::FULL);

        m.shift(-120.0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_display_and_inverse() {
        let m = Meter::new(12.6);
        assert_eq!(m.to_string(), "13%");
        assert_eq!(Meter::new(30.0).inverse().percent(), 70);
    }

    #[test]
    fn test_serde_as_plain_number() {
        let json = serde_json::to_string(&Meter::new(55.0)).unwrap();
        assert_eq!(json, "55.0");

        let back: Meter = serde_json::from_str("250").unwrap();
        assert_eq!(back, Meter::FULL);
    }
}
