//! Running a simulation end to end.
//!
//! [`simulate`] is the pure core: resolved system in, segments, events,
//! series and summary out. [`run`] wraps it for callers that keep an event
//! log: it logs the run and hands the events to a sink once the whole
//! trajectory has been built.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use coilgun_model::SystemId;

use crate::aggregator::{self, TrajectorySeries, TrajectorySummary};
use crate::builder;
use crate::context::{RunContext, RunId};
use crate::error::SimResult;
use crate::events::{EngagementEvent, EventSink};
use crate::resolver::{ResolvedSystem, SystemDetails};
use crate::segment::Segment;

/// Everything one simulation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub segments: Vec<Segment>,
    pub events: Vec<EngagementEvent>,
    pub series: TrajectorySeries,
    pub summary: TrajectorySummary,
}

impl SimulationOutcome {
    /// Bundle the outcome with its run identity and configuration.
    #[must_use]
    pub fn into_report(self, ctx: &RunContext, system: SystemDetails) -> SimulationReport {
        SimulationReport {
            run_id: ctx.run_id,
            system_id: ctx.system_id,
            system,
            summary: self.summary,
            series: self.series,
            segments: self.segments,
            events: self.events,
        }
    }
}

/// A self-contained, serialisable record of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: RunId,
    pub system_id: SystemId,
    pub system: SystemDetails,
    pub summary: TrajectorySummary,
    pub series: TrajectorySeries,
    pub segments: Vec<Segment>,
    pub events: Vec<EngagementEvent>,
}

/// Simulate `system`. Pure and deterministic.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidTrajectory`](crate::SimulationError::InvalidTrajectory)
/// if the capsule cannot reach the tube end.
pub fn simulate(system: &ResolvedSystem) -> SimResult<SimulationOutcome> {
    let trajectory = builder::build(system)?;
    let series = aggregator::series(&trajectory.segments);
    let summary = aggregator::summarize(&trajectory.segments);
    Ok(SimulationOutcome {
        segments: trajectory.segments,
        events: trajectory.events,
        series,
        summary,
    })
}

/// Simulate `system` as run `ctx` and record its events in `sink`.
///
/// The sink sees nothing from a failed run.
///
/// # Errors
///
/// Propagates any error from [`simulate`].
pub fn run<K: EventSink + ?Sized>(
    ctx: &RunContext,
    system: &ResolvedSystem,
    sink: &mut K,
) -> SimResult<SimulationOutcome> {
    info!(
        run = %ctx.run_id,
        system = %ctx.system_id,
        coils = system.coils().len(),
        "simulation starting"
    );

    let outcome = match simulate(system) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(run = %ctx.run_id, system = %ctx.system_id, error = %e, "simulation failed");
            return Err(e);
        }
    };

    sink.record(ctx, &outcome.events);

    info!(
        run = %ctx.run_id,
        total_travel_time_s = outcome.summary.total_travel_time_s,
        final_velocity_mps = outcome.summary.final_velocity_mps,
        total_energy_consumed_j = outcome.summary.total_energy_consumed_j,
        "simulation complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use coilgun_model::{Capsule, Coil, Tube};

    use super::*;
    use crate::error::SimulationError;
    use crate::events::VecSink;
    use crate::resolver::PositionedCoil;

    fn system(coils: Vec<PositionedCoil>) -> ResolvedSystem {
        ResolvedSystem::new(Tube::new(1, 10.0), Capsule::new(1, 1.0, 1.0), coils).unwrap()
    }

    #[test]
    fn test_simulate_reference_summary() {
        let sys = system(vec![PositionedCoil::new(Coil::new(1, 2.0, 10.0), 4.0)]);
        let outcome = simulate(&sys).unwrap();
        assert!((outcome.summary.total_travel_time_s - 6.231_129_130_4).abs() < 1e-6);
        assert!((outcome.summary.final_velocity_mps - 21.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(outcome.summary.total_energy_consumed_j, 10.0);
        assert_eq!(outcome.series.position_m.len(), outcome.segments.len());
    }

    #[test]
    fn test_summary_matches_segments() {
        let sys = system(vec![
            PositionedCoil::new(Coil::new(1, 1.0, 3.0), 1.0),
            PositionedCoil::new(Coil::new(2, 2.0, -0.5), 4.0),
            PositionedCoil::new(Coil::new(3, 1.0, 2.0), 8.0),
        ]);
        let outcome = simulate(&sys).unwrap();
        let accel_energy: f64 = outcome
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Accel(a) => Some(a.energy_consumed_j),
                Segment::Coast(_) => None,
            })
            .sum();
        assert!((outcome.summary.total_energy_consumed_j - accel_energy).abs() < 1e-12);

        let end = outcome.events.last().unwrap();
        assert!((end.timestamp_s - outcome.summary.total_travel_time_s).abs() < 1e-9);
        assert_eq!(end.velocity_mps, outcome.summary.final_velocity_mps);
    }

    #[test]
    fn test_zero_coil_summary() {
        let outcome = simulate(&system(vec![])).unwrap();
        assert_eq!(outcome.segments.len(), 1);
        assert_eq!(outcome.summary.total_travel_time_s, 10.0);
        assert_eq!(outcome.summary.final_velocity_mps, 1.0);
        assert_eq!(outcome.summary.total_energy_consumed_j, 0.0);
    }

    #[test]
    fn test_run_records_events_in_sink() {
        let sys = system(vec![PositionedCoil::new(Coil::new(1, 2.0, 10.0), 4.0)]);
        let ctx = RunContext::new(7);
        let mut sink = VecSink::new();
        let outcome = run(&ctx, &sys, &mut sink).unwrap();
        assert_eq!(sink.events.len(), outcome.events.len());
        assert!(sink.events.iter().all(|(c, _)| *c == ctx));
    }

    #[test]
    fn test_failed_run_records_nothing() {
        let sys = system(vec![PositionedCoil::new(Coil::new(1, 2.0, -10.0), 4.0)]);
        let ctx = RunContext::new(7);
        let mut sink = VecSink::new();
        let err = run(&ctx, &sys, &mut sink).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidTrajectory { .. }));
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_report_carries_run_identity() {
        let sys = system(vec![]);
        let ctx = RunContext::new(3);
        let report = simulate(&sys).unwrap().into_report(&ctx, sys.details());
        assert_eq!(report.run_id, ctx.run_id);
        assert_eq!(report.system_id, SystemId(3));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["total_travel_time_s"], 10.0);
        assert_eq!(json["events"][0]["kind"], "run_start");
    }
}
