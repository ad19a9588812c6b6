//! System configuration.

use serde::{Deserialize, Serialize};

use crate::ids::{CapsuleId, CoilId, SystemId, TubeId};

/// Places one coil at a position along the tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilPlacement {
    pub coil_id: CoilId,
    /// Distance from the tube entrance to the coil's leading edge, in metres.
    pub position_m: f64,
}

/// An accelerator assembly: one tube, one capsule, and any number of coils
/// placed along the tube.
///
/// Placements are kept in the order they were added. Sorting and validation
/// happen when the system is resolved, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub id: SystemId,
    pub tube_id: TubeId,
    pub capsule_id: CapsuleId,
    #[serde(default)]
    pub coils: Vec<CoilPlacement>,
}

impl SystemConfig {
    /// Create a system with no coils.
    #[must_use]
    pub fn new(
        id: impl Into<SystemId>,
        tube_id: impl Into<TubeId>,
        capsule_id: impl Into<CapsuleId>,
    ) -> Self {
        Self {
            id: id.into(),
            tube_id: tube_id.into(),
            capsule_id: capsule_id.into(),
            coils: Vec::new(),
        }
    }

    /// Place a coil at `position_m`.
    #[must_use]
    pub fn with_coil(mut self, coil_id: impl Into<CoilId>, position_m: f64) -> Self {
        self.coils.push(CoilPlacement {
            coil_id: coil_id.into(),
            position_m,
        });
        self
    }

    /// Returns the position of a coil in this system, if it is placed here.
    #[must_use]
    pub fn position_of(&self, coil_id: CoilId) -> Option<f64> {
        self.coils
            .iter()
            .find(|p| p.coil_id == coil_id)
            .map(|p| p.position_m)
    }
}
