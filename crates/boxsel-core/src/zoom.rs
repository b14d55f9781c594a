// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;
pub const ZOOM_STEP: f64 = 0.25;

/// Scale factor applied around the selection centroid, always within
/// `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Zoom(f64);

impl Zoom {
    pub const ONE: Zoom = Zoom(1.0);

    /// Clamps into range; non-finite input falls back to 1.0.
    pub fn new(factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::ONE;
        }
        Zoom(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    pub fn step_in(self) -> Self {
        Zoom::new(self.0 + ZOOM_STEP)
    }

    pub fn step_out(self) -> Self {
        Zoom::new(self.0 - ZOOM_STEP)
    }

    pub fn can_step_in(self) -> bool {
        self.0 < MAX_ZOOM
    }

    pub fn can_step_out(self) -> bool {
        self.0 > MIN_ZOOM
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<f64> for Zoom {
    fn from(v: f64) -> Self {
        Zoom::new(v)
    }
}

impl From<Zoom> for f64 {
    fn from(z: Zoom) -> Self {
        z.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_range() {
        assert_eq!(Zoom::new(10.0).factor(), MAX_ZOOM);
        assert_eq!(Zoom::new(0.0).factor(), MIN_ZOOM);
        assert_eq!(Zoom::new(f64::NAN), Zoom::ONE);
    }

    #[test]
    fn steps_saturate() {
        let mut z = Zoom::ONE;
        for _ in 0..20 {
            z = z.step_in();
        }
        assert_eq!(z.factor(), MAX_ZOOM);
        assert!(!z.can_step_in());

        for _ in 0..20 {
            z = z.step_out();
        }
        assert_eq!(z.factor(), MIN_ZOOM);
        assert!(!z.can_step_out());
        assert_eq!(z.percent(), 25);
    }
}
