//! Segment building.
//!
//! Walks a [`ResolvedSystem`] once, from the tube entrance to its end, and
//! produces the segment list and the engagement events of the run.
//!
//! ## Layout
//!
//! ```text
//!  0          coil 1                coil 2                 L
//!  |----------[====|====]-----------[====|====]------------|
//!  | coast 1       |accel| coast 2       |accel| coast 3   |
//! ```
//!
//! The first coast runs from the entrance to the first coil's midpoint.
//! Each coil then contributes an accel segment over its second half and a
//! coast segment up to the next coil's midpoint, or to the tube end after
//! the last coil. A tube without coils is a single coast.

use tracing::debug;

use coilgun_model::CoilId;
use coilgun_physics as kernel;
use coilgun_physics::KernelError;

use crate::error::{SimResult, SimulationError};
use crate::events::EngagementEvent;
use crate::resolver::{PositionedCoil, ResolvedSystem};
use crate::segment::{AccelSegment, CoastSegment, Segment};

/// Segments and events of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub segments: Vec<Segment>,
    pub events: Vec<EngagementEvent>,
}

/// Build the trajectory for `system`.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidTrajectory`] if a decelerating coil
/// stops the capsule before it clears the tube.
pub fn build(system: &ResolvedSystem) -> SimResult<Trajectory> {
    SegmentBuilder::new(system).build()
}

/// Single-pass state: the clock and velocity carried from segment to segment.
struct SegmentBuilder<'a> {
    system: &'a ResolvedSystem,
    segments: Vec<Segment>,
    events: Vec<EngagementEvent>,
    time_s: f64,
    velocity_mps: f64,
    next_id: u32,
}

impl<'a> SegmentBuilder<'a> {
    fn new(system: &'a ResolvedSystem) -> Self {
        let coils = system.coils().len();
        Self {
            system,
            segments: Vec::with_capacity(1 + 2 * coils),
            events: Vec::with_capacity(2 + 3 * coils),
            time_s: 0.0,
            velocity_mps: system.capsule().initial_velocity_mps,
            next_id: 1,
        }
    }

    fn build(mut self) -> SimResult<Trajectory> {
        let system = self.system;
        let tube_length_m = system.tube().length_m;
        let coils = system.coils();

        self.events.push(EngagementEvent::run_start(self.velocity_mps));

        match coils.first() {
            None => {
                self.coast(0.0, tube_length_m, None)?;
            }
            Some(first) => {
                self.enter(first, 0.0)?;
                self.coast(0.0, first.midpoint_m(), Some(first.id()))?;

                for (i, coil) in coils.iter().enumerate() {
                    self.accelerate(coil)?;

                    let next = coils.get(i + 1);
                    if let Some(next) = next {
                        self.enter(next, coil.end_m())?;
                    }
                    let end_m = next.map_or(tube_length_m, PositionedCoil::midpoint_m);
                    self.coast(coil.end_m(), end_m, Some(coil.id()))?;
                }
            }
        }

        self.events.push(EngagementEvent::run_end(
            self.time_s,
            tube_length_m,
            self.velocity_mps,
        ));

        debug!(
            segments = self.segments.len(),
            events = self.events.len(),
            travel_time_s = self.time_s,
            final_velocity_mps = self.velocity_mps,
            "built trajectory"
        );

        Ok(Trajectory {
            segments: self.segments,
            events: self.events,
        })
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Emit `coil_enter` for `coil`, reached by coasting from `from_m` at the
    /// current velocity. Does not advance the clock: the enclosing coast
    /// segment does.
    fn enter(&mut self, coil: &PositionedCoil, from_m: f64) -> SimResult<()> {
        let distance_m = coil.start_m() - from_m;
        let dt = kernel::coast_time(self.velocity_mps, distance_m)
            .map_err(|e| self.trajectory_error(e, self.blame(), 0.0, distance_m))?;
        self.events.push(EngagementEvent::coil_enter(
            self.time_s + dt,
            coil.id(),
            coil.start_m(),
            self.velocity_mps,
        ));
        Ok(())
    }

    /// Constant-velocity segment over `[from_m, to_m]`.
    fn coast(&mut self, from_m: f64, to_m: f64, related: Option<CoilId>) -> SimResult<()> {
        let length_m = to_m - from_m;
        let traverse_time_s = kernel::coast_time(self.velocity_mps, length_m)
            .map_err(|e| self.trajectory_error(e, self.blame(), 0.0, length_m))?;

        let id = self.take_id();
        self.segments.push(Segment::Coast(CoastSegment {
            id,
            start_time_s: self.time_s,
            start_position_m: from_m,
            length_m,
            velocity_mps: self.velocity_mps,
            traverse_time_s,
            related_coil_id: related,
        }));
        self.time_s += traverse_time_s;
        Ok(())
    }

    /// Constant-acceleration segment over the second half of `coil`.
    fn accelerate(&mut self, coil: &PositionedCoil) -> SimResult<()> {
        let force_n = coil.coil.force_applied_n;
        let distance_m = coil.coil.half_length_m();
        let start_velocity_mps = self.velocity_mps;
        let acceleration_mps2 = kernel::acceleration(force_n, self.system.capsule().mass_kg);

        let fail = |e: KernelError| {
            self.trajectory_error(e, Some(coil.id()), acceleration_mps2, distance_m)
        };

        // Zero force is a coast in all but name; the acceleration-time
        // formula is undefined there.
        let (final_velocity_mps, traverse_time_s) = if acceleration_mps2 == 0.0 {
            let t = kernel::coast_time(start_velocity_mps, distance_m).map_err(fail)?;
            (start_velocity_mps, t)
        } else {
            let v1 = kernel::final_velocity(start_velocity_mps, acceleration_mps2, distance_m)
                .map_err(fail)?;
            let t = kernel::span_time(start_velocity_mps, v1, distance_m).map_err(fail)?;
            (v1, t)
        };
        let energy_consumed_j = kernel::energy(force_n, distance_m);

        self.events.push(EngagementEvent::coil_midpoint(
            self.time_s,
            coil.id(),
            coil.midpoint_m(),
            start_velocity_mps,
            acceleration_mps2,
            force_n,
        ));
        self.events.push(EngagementEvent::coil_exit(
            self.time_s + traverse_time_s,
            coil.id(),
            coil.end_m(),
            final_velocity_mps,
            traverse_time_s,
            distance_m,
            energy_consumed_j,
        ));

        let id = self.take_id();
        self.segments.push(Segment::Accel(AccelSegment {
            id,
            start_time_s: self.time_s,
            start_position_m: coil.midpoint_m(),
            length_m: distance_m,
            start_velocity_mps,
            final_velocity_mps,
            acceleration_mps2,
            force_applied_n: force_n,
            traverse_time_s,
            energy_consumed_j,
            related_coil_id: coil.id(),
        }));

        self.time_s += traverse_time_s;
        self.velocity_mps = final_velocity_mps;
        Ok(())
    }

    /// The coil responsible for the current velocity: the last one the
    /// capsule passed through, if any.
    fn blame(&self) -> Option<CoilId> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::Accel(a) => Some(a.related_coil_id),
            Segment::Coast(_) => None,
        })
    }

    fn trajectory_error(
        &self,
        err: KernelError,
        coil_id: Option<CoilId>,
        acceleration_mps2: f64,
        distance_m: f64,
    ) -> SimulationError {
        debug!(error = %err, ?coil_id, "trajectory aborted");
        SimulationError::InvalidTrajectory {
            coil_id,
            start_velocity_mps: self.velocity_mps,
            acceleration_mps2,
            distance_m,
        }
    }
}
