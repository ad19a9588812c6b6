//! System resolution.
//!
//! Turns a [`SystemConfig`] (ids and positions) into a [`ResolvedSystem`]
//! (values, validated and ordered by position). Checks run in a fixed order
//! and the first failure wins:
//!
//! 1. every id resolves in the [`EntityStore`];
//! 2. every physical parameter is positive and finite;
//! 3. every coil lies inside the tube;
//! 4. adjacent coils, after sorting by position, do not overlap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use coilgun_model::{Capsule, Coil, CoilId, EntityStore, SystemConfig, Tube};

use crate::error::{EntityKind, SimResult, SimulationError};

/// A coil bound to a position in one system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedCoil {
    pub coil: Coil,
    /// Leading edge of the coil, in metres from the tube entrance.
    pub position_m: f64,
}

impl PositionedCoil {
    #[must_use]
    pub fn new(coil: Coil, position_m: f64) -> Self {
        Self { coil, position_m }
    }

    #[must_use]
    pub fn id(&self) -> CoilId {
        self.coil.id
    }

    #[must_use]
    pub fn start_m(&self) -> f64 {
        self.position_m
    }

    /// Where the coil starts pushing the capsule.
    #[must_use]
    pub fn midpoint_m(&self) -> f64 {
        self.position_m + self.coil.half_length_m()
    }

    #[must_use]
    pub fn end_m(&self) -> f64 {
        self.position_m + self.coil.length_m
    }
}

/// A validated tube, capsule and coil set, coils in ascending position order.
///
/// Fields are private so the ordering and non-overlap guarantees cannot be
/// broken after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSystem {
    tube: Tube,
    capsule: Capsule,
    coils: Vec<PositionedCoil>,
}

impl ResolvedSystem {
    /// Validate in-memory values and order the coils.
    ///
    /// Coils sharing a position keep their input order (stable sort); the
    /// overlap check then rejects them unless one of them could fit, which a
    /// positive-length coil never can.
    ///
    /// # Errors
    ///
    /// Returns the first of [`SimulationError::InvalidParameter`],
    /// [`SimulationError::DuplicateCoil`], [`SimulationError::CoilOutOfRange`]
    /// or [`SimulationError::CoilOverlap`] that applies.
    pub fn new(tube: Tube, capsule: Capsule, mut coils: Vec<PositionedCoil>) -> SimResult<Self> {
        check_positive("tube.length_m", tube.length_m)?;
        check_positive("capsule.mass_kg", capsule.mass_kg)?;
        check_positive(
            "capsule.initial_velocity_mps",
            capsule.initial_velocity_mps,
        )?;
        for (i, pc) in coils.iter().enumerate() {
            check_positive("coil.length_m", pc.coil.length_m)?;
            check_finite("coil.force_applied_n", pc.coil.force_applied_n)?;
            check_finite("coil.position_m", pc.position_m)?;
            if coils[..i].iter().any(|other| other.id() == pc.id()) {
                return Err(SimulationError::DuplicateCoil(pc.id()));
            }
        }

        for pc in &coils {
            if pc.start_m() < 0.0 || pc.end_m() > tube.length_m {
                return Err(SimulationError::CoilOutOfRange {
                    coil_id: pc.id(),
                    start_m: pc.start_m(),
                    end_m: pc.end_m(),
                    tube_length_m: tube.length_m,
                });
            }
        }

        coils.sort_by(|a, b| a.position_m.total_cmp(&b.position_m));

        for pair in coils.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if first.end_m() > second.start_m() {
                return Err(SimulationError::CoilOverlap {
                    first: first.id(),
                    second: second.id(),
                    first_end_m: first.end_m(),
                    second_start_m: second.start_m(),
                });
            }
        }

        Ok(Self {
            tube,
            capsule,
            coils,
        })
    }

    #[must_use]
    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    #[must_use]
    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    /// Coils in ascending position order.
    #[must_use]
    pub fn coils(&self) -> &[PositionedCoil] {
        &self.coils
    }

    /// A serialisable snapshot of the configuration, for run records.
    #[must_use]
    pub fn details(&self) -> SystemDetails {
        SystemDetails {
            tube: self.tube,
            capsule: self.capsule,
            coils: self.coils.clone(),
        }
    }
}

/// Snapshot of a resolved system as it was simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDetails {
    pub tube: Tube,
    pub capsule: Capsule,
    pub coils: Vec<PositionedCoil>,
}

/// Look up every entity a [`SystemConfig`] references and validate the result.
///
/// # Errors
///
/// Returns [`SimulationError::UnknownEntity`] for the first id that does not
/// resolve, then any error from [`ResolvedSystem::new`].
pub fn resolve<S: EntityStore>(config: &SystemConfig, store: &S) -> SimResult<ResolvedSystem> {
    let tube = store
        .tube(config.tube_id)
        .ok_or(SimulationError::UnknownEntity {
            kind: EntityKind::Tube,
            id: config.tube_id.id(),
        })?;
    let capsule = store
        .capsule(config.capsule_id)
        .ok_or(SimulationError::UnknownEntity {
            kind: EntityKind::Capsule,
            id: config.capsule_id.id(),
        })?;

    let coils = config
        .coils
        .iter()
        .map(|placement| {
            store
                .coil(placement.coil_id)
                .map(|coil| PositionedCoil::new(coil, placement.position_m))
                .ok_or(SimulationError::UnknownEntity {
                    kind: EntityKind::Coil,
                    id: placement.coil_id.id(),
                })
        })
        .collect::<SimResult<Vec<_>>>()?;

    let system = ResolvedSystem::new(tube, capsule, coils)?;
    debug!(
        system = %config.id,
        tube_length_m = system.tube.length_m,
        coil_count = system.coils.len(),
        "resolved system"
    );
    Ok(system)
}

fn check_positive(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { field, value })
    }
}

fn check_finite(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { field, value })
    }
}
