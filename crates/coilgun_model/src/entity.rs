//! Physical entities of the accelerator.
//!
//! All quantities are SI: metres, kilograms, seconds, newtons.

use serde::{Deserialize, Serialize};

use crate::ids::{CapsuleId, CoilId, TubeId};

/// The tube the capsule travels through. Defines the coordinate range
/// `[0, length_m]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tube {
    pub id: TubeId,
    /// Tube length in metres.
    pub length_m: f64,
}

impl Tube {
    #[must_use]
    pub fn new(id: impl Into<TubeId>, length_m: f64) -> Self {
        Self {
            id: id.into(),
            length_m,
        }
    }
}

/// The projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub id: CapsuleId,
    /// Mass in kilograms.
    pub mass_kg: f64,
    /// Velocity at position 0, time 0, in m/s.
    pub initial_velocity_mps: f64,
}

impl Capsule {
    #[must_use]
    pub fn new(id: impl Into<CapsuleId>, mass_kg: f64, initial_velocity_mps: f64) -> Self {
        Self {
            id: id.into(),
            mass_kg,
            initial_velocity_mps,
        }
    }
}

/// A force-applying coil. Its placement along a tube is not part of the coil
/// itself; see [`CoilPlacement`](crate::CoilPlacement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub id: CoilId,
    /// Coil length in metres.
    pub length_m: f64,
    /// Force applied to the capsule in newtons. Negative values decelerate.
    pub force_applied_n: f64,
}

impl Coil {
    #[must_use]
    pub fn new(id: impl Into<CoilId>, length_m: f64, force_applied_n: f64) -> Self {
        Self {
            id: id.into(),
            length_m,
            force_applied_n,
        }
    }

    /// Half of the coil length: the span over which it accelerates the capsule.
    #[must_use]
    pub fn half_length_m(&self) -> f64 {
        self.length_m / 2.0
    }

    /// Returns `true` if the coil slows the capsule down.
    #[must_use]
    pub fn is_decelerating(&self) -> bool {
        self.force_applied_n < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coil_half_length() {
        let coil = Coil::new(1, 2.5, 10.0);
        assert!((coil.half_length_m() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coil_deceleration_flag() {
        assert!(Coil::new(1, 1.0, -3.0).is_decelerating());
        assert!(!Coil::new(2, 1.0, 3.0).is_decelerating());
        assert!(!Coil::new(3, 1.0, 0.0).is_decelerating());
    }

    #[test]
    fn test_capsule_json_shape() {
        let capsule = Capsule::new(4, 1.5, 2.0);
        let value = serde_json::to_value(capsule).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["mass_kg"], 1.5);
        assert_eq!(value["initial_velocity_mps"], 2.0);
    }
}
