//! Simulation error types.

use coilgun_model::CoilId;

/// The kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tube,
    Coil,
    Capsule,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tube => "tube",
            Self::Coil => "coil",
            Self::Capsule => "capsule",
        };
        f.write_str(name)
    }
}

/// Errors raised while resolving or simulating a system.
///
/// Structural errors (`UnknownEntity` through `CoilOverlap`) are raised
/// before any segment is built. `InvalidTrajectory` aborts segment building;
/// no partial trajectory is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// A referenced id does not resolve to stored data.
    #[error("unknown {kind} {id}")]
    UnknownEntity { kind: EntityKind, id: u64 },

    /// A physical parameter is non-positive or not finite.
    #[error("invalid {field} = {value}")]
    InvalidParameter { field: &'static str, value: f64 },

    /// The same coil is placed more than once in one system.
    #[error("{0} is placed more than once")]
    DuplicateCoil(CoilId),

    /// A coil does not fit inside the tube.
    #[error("{coil_id} spans [{start_m}, {end_m}] m, outside tube [0, {tube_length_m}] m")]
    CoilOutOfRange {
        coil_id: CoilId,
        start_m: f64,
        end_m: f64,
        tube_length_m: f64,
    },

    /// Two coils occupy overlapping stretches of the tube.
    #[error("{first} (ends at {first_end_m} m) overlaps {second} (starts at {second_start_m} m)")]
    CoilOverlap {
        first: CoilId,
        second: CoilId,
        first_end_m: f64,
        second_start_m: f64,
    },

    /// The capsule would stop or reverse before clearing a segment.
    #[error(
        "capsule cannot clear {distance_m} m after {} (v = {start_velocity_mps} m/s, a = {acceleration_mps2} m/s²)",
        describe_coil(.coil_id)
    )]
    InvalidTrajectory {
        coil_id: Option<CoilId>,
        start_velocity_mps: f64,
        acceleration_mps2: f64,
        distance_m: f64,
    },
}

fn describe_coil(coil_id: &Option<CoilId>) -> String {
    match coil_id {
        Some(id) => id.to_string(),
        None => "launch".to_string(),
    }
}

/// Convenience alias for `Result<T, SimulationError>`.
pub type SimResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_message_names_both_coils() {
        let err = SimulationError::CoilOverlap {
            first: CoilId(1),
            second: CoilId(2),
            first_end_m: 5.0,
            second_start_m: 4.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Coil(1)"));
        assert!(msg.contains("Coil(2)"));
    }

    #[test]
    fn test_invalid_trajectory_message() {
        let err = SimulationError::InvalidTrajectory {
            coil_id: Some(CoilId(9)),
            start_velocity_mps: 1.0,
            acceleration_mps2: -10.0,
            distance_m: 1.0,
        };
        assert!(err.to_string().contains("Coil(9)"));
    }

    #[test]
    fn test_unknown_entity_message() {
        let err = SimulationError::UnknownEntity {
            kind: EntityKind::Capsule,
            id: 3,
        };
        assert_eq!(err.to_string(), "unknown capsule 3");
    }
}
