//! Engagement events and the sinks that receive them.
//!
//! Events mark the instants that matter when reading a run back: launch,
//! each coil's entry, midpoint and exit, and arrival at the tube end. One
//! run's events are ordered by timestamp.

use serde::{Deserialize, Serialize};

use coilgun_model::CoilId;

use crate::context::RunContext;

/// What happened at an [`EngagementEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RunStart,
    CoilEnter,
    CoilMidpointAccel,
    CoilExit,
    RunEnd,
}

impl EventKind {
    /// The snake_case name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunStart => "run_start",
            Self::CoilEnter => "coil_enter",
            Self::CoilMidpointAccel => "coil_midpoint_accel",
            Self::CoilExit => "coil_exit",
            Self::RunEnd => "run_end",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run_start" => Ok(Self::RunStart),
            "coil_enter" => Ok(Self::CoilEnter),
            "coil_midpoint_accel" => Ok(Self::CoilMidpointAccel),
            "coil_exit" => Ok(Self::CoilExit),
            "run_end" => Ok(Self::RunEnd),
            other => Err(format!("unknown event kind: {other}")),
        }
    }
}

/// A timestamped marker of a physically significant instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub timestamp_s: f64,
    pub kind: EventKind,
    pub position_m: f64,
    pub velocity_mps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coil_id: Option<CoilId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_mps2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_applied_n: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_consumed_j: Option<f64>,
    /// Time spent accelerating inside the coil (`coil_exit` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
    /// Length of the acceleration span (`coil_exit` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_length_m: Option<f64>,
}

impl EngagementEvent {
    fn bare(kind: EventKind, timestamp_s: f64, position_m: f64, velocity_mps: f64) -> Self {
        Self {
            timestamp_s,
            kind,
            position_m,
            velocity_mps,
            coil_id: None,
            acceleration_mps2: None,
            force_applied_n: None,
            energy_consumed_j: None,
            duration_s: None,
            segment_length_m: None,
        }
    }

    /// Launch at the tube entrance.
    #[must_use]
    pub fn run_start(velocity_mps: f64) -> Self {
        Self::bare(EventKind::RunStart, 0.0, 0.0, velocity_mps)
    }

    /// The capsule reaches the leading edge of a coil.
    #[must_use]
    pub fn coil_enter(timestamp_s: f64, coil_id: CoilId, position_m: f64, velocity_mps: f64) -> Self {
        Self {
            coil_id: Some(coil_id),
            ..Self::bare(EventKind::CoilEnter, timestamp_s, position_m, velocity_mps)
        }
    }

    /// The capsule reaches a coil's midpoint and the coil starts pushing.
    #[must_use]
    pub fn coil_midpoint(
        timestamp_s: f64,
        coil_id: CoilId,
        position_m: f64,
        velocity_mps: f64,
        acceleration_mps2: f64,
        force_applied_n: f64,
    ) -> Self {
        Self {
            coil_id: Some(coil_id),
            acceleration_mps2: Some(acceleration_mps2),
            force_applied_n: Some(force_applied_n),
            ..Self::bare(
                EventKind::CoilMidpointAccel,
                timestamp_s,
                position_m,
                velocity_mps,
            )
        }
    }

    /// The capsule leaves a coil.
    #[must_use]
    pub fn coil_exit(
        timestamp_s: f64,
        coil_id: CoilId,
        position_m: f64,
        velocity_mps: f64,
        duration_s: f64,
        segment_length_m: f64,
        energy_consumed_j: f64,
    ) -> Self {
        Self {
            coil_id: Some(coil_id),
            duration_s: Some(duration_s),
            segment_length_m: Some(segment_length_m),
            energy_consumed_j: Some(energy_consumed_j),
            ..Self::bare(EventKind::CoilExit, timestamp_s, position_m, velocity_mps)
        }
    }

    /// Arrival at the tube end.
    #[must_use]
    pub fn run_end(timestamp_s: f64, position_m: f64, velocity_mps: f64) -> Self {
        Self::bare(EventKind::RunEnd, timestamp_s, position_m, velocity_mps)
    }
}

/// Receives the events of completed runs.
///
/// A sink is only handed events after the whole run succeeded, in timestamp
/// order, in one call.
pub trait EventSink {
    fn record(&mut self, ctx: &RunContext, events: &[EngagementEvent]);
}

/// Collects events in memory, tagged with their run.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<(RunContext, EngagementEvent)>,
}

impl VecSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn record(&mut self, ctx: &RunContext, events: &[EngagementEvent]) {
        self.events
            .extend(events.iter().cloned().map(|e| (ctx.clone(), e)));
    }
}
