//! Kinematic segments.
//!
//! A trajectory is a list of [`Segment`]s that tile the tube end to end, in
//! both position and time. Each segment is either a coast at constant
//! velocity or a constant-acceleration push under one coil.

use serde::{Deserialize, Serialize};

use coilgun_model::CoilId;

/// Constant-velocity span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoastSegment {
    /// Sequential number within the run, starting at 1.
    pub id: u32,
    pub start_time_s: f64,
    pub start_position_m: f64,
    pub length_m: f64,
    pub velocity_mps: f64,
    pub traverse_time_s: f64,
    /// The coil the capsule is approaching (first segment) or has just left.
    /// `None` when the tube has no coils.
    pub related_coil_id: Option<CoilId>,
}

/// Constant-acceleration span from a coil's midpoint to its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelSegment {
    /// Sequential number within the run, starting at 1.
    pub id: u32,
    pub start_time_s: f64,
    pub start_position_m: f64,
    pub length_m: f64,
    pub start_velocity_mps: f64,
    pub final_velocity_mps: f64,
    pub acceleration_mps2: f64,
    pub force_applied_n: f64,
    pub traverse_time_s: f64,
    pub energy_consumed_j: f64,
    pub related_coil_id: CoilId,
}

/// One piece of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Coast(CoastSegment),
    Accel(AccelSegment),
}

impl Segment {
    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            Self::Coast(s) => s.id,
            Self::Accel(s) => s.id,
        }
    }

    #[must_use]
    pub fn start_time_s(&self) -> f64 {
        match self {
            Self::Coast(s) => s.start_time_s,
            Self::Accel(s) => s.start_time_s,
        }
    }

    #[must_use]
    pub fn traverse_time_s(&self) -> f64 {
        match self {
            Self::Coast(s) => s.traverse_time_s,
            Self::Accel(s) => s.traverse_time_s,
        }
    }

    #[must_use]
    pub fn end_time_s(&self) -> f64 {
        self.start_time_s() + self.traverse_time_s()
    }

    #[must_use]
    pub fn start_position_m(&self) -> f64 {
        match self {
            Self::Coast(s) => s.start_position_m,
            Self::Accel(s) => s.start_position_m,
        }
    }

    #[must_use]
    pub fn length_m(&self) -> f64 {
        match self {
            Self::Coast(s) => s.length_m,
            Self::Accel(s) => s.length_m,
        }
    }

    #[must_use]
    pub fn end_position_m(&self) -> f64 {
        self.start_position_m() + self.length_m()
    }

    /// Velocity at the start of the segment.
    #[must_use]
    pub fn entry_velocity_mps(&self) -> f64 {
        match self {
            Self::Coast(s) => s.velocity_mps,
            Self::Accel(s) => s.start_velocity_mps,
        }
    }

    /// Velocity at the end of the segment.
    #[must_use]
    pub fn exit_velocity_mps(&self) -> f64 {
        match self {
            Self::Coast(s) => s.velocity_mps,
            Self::Accel(s) => s.final_velocity_mps,
        }
    }

    #[must_use]
    pub fn acceleration_mps2(&self) -> f64 {
        match self {
            Self::Coast(_) => 0.0,
            Self::Accel(s) => s.acceleration_mps2,
        }
    }

    #[must_use]
    pub fn force_applied_n(&self) -> f64 {
        match self {
            Self::Coast(_) => 0.0,
            Self::Accel(s) => s.force_applied_n,
        }
    }

    /// Energy spent by the coil driving this segment. Coasting costs nothing.
    #[must_use]
    pub fn energy_consumed_j(&self) -> f64 {
        match self {
            Self::Coast(_) => 0.0,
            Self::Accel(s) => s.energy_consumed_j,
        }
    }

    #[must_use]
    pub fn related_coil_id(&self) -> Option<CoilId> {
        match self {
            Self::Coast(s) => s.related_coil_id,
            Self::Accel(s) => Some(s.related_coil_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accel() -> Segment {
        Segment::Accel(AccelSegment {
            id: 2,
            start_time_s: 5.0,
            start_position_m: 5.0,
            length_m: 1.0,
            start_velocity_mps: 1.0,
            final_velocity_mps: 3.0,
            acceleration_mps2: 4.0,
            force_applied_n: 4.0,
            traverse_time_s: 0.5,
            energy_consumed_j: 4.0,
            related_coil_id: CoilId(1),
        })
    }

    #[test]
    fn test_accel_segment_accessors() {
        let s = accel();
        assert_eq!(s.id(), 2);
        assert_eq!(s.end_time_s(), 5.5);
        assert_eq!(s.end_position_m(), 6.0);
        assert_eq!(s.entry_velocity_mps(), 1.0);
        assert_eq!(s.exit_velocity_mps(), 3.0);
        assert_eq!(s.energy_consumed_j(), 4.0);
        assert_eq!(s.related_coil_id(), Some(CoilId(1)));
    }

    #[test]
    fn test_coast_segment_has_no_force() {
        let s = Segment::Coast(CoastSegment {
            id: 1,
            start_time_s: 0.0,
            start_position_m: 0.0,
            length_m: 4.0,
            velocity_mps: 2.0,
            traverse_time_s: 2.0,
            related_coil_id: None,
        });
        assert_eq!(s.acceleration_mps2(), 0.0);
        assert_eq!(s.force_applied_n(), 0.0);
        assert_eq!(s.energy_consumed_j(), 0.0);
        assert_eq!(s.entry_velocity_mps(), s.exit_velocity_mps());
        assert_eq!(s.related_coil_id(), None);
    }

    #[test]
    fn test_segment_serialises_with_kind_tag() {
        let value = serde_json::to_value(accel()).unwrap();
        assert_eq!(value["kind"], "accel");
        assert_eq!(value["related_coil_id"], 1);
    }
}
