//! Run log: tracks simulation runs and the events they produced.
//!
//! Each run moves through `running → completed` or `running → failed`.
//! Events arrive through the [`EventSink`] implementation and are kept per
//! run, in the order recorded.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use coilgun_model::SystemId;
use coilgun_sim::analytics::{self, EnergyBreakdown, EventFilter};
use coilgun_sim::{
    EngagementEvent, EventKind, EventSink, RunContext, RunId, SystemDetails, TrajectorySeries,
    TrajectorySummary,
};

use crate::error::StoreError;

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What is known about one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: RunId,
    pub system_id: SystemId,
    pub status: RunStatus,
    /// Configuration the run was started with.
    pub system: SystemDetails,
    /// Set once the run completes.
    pub summary: Option<TrajectorySummary>,
    /// Set if the run fails.
    pub error: Option<String>,
    /// Start order within this log.
    pub sequence: u64,
}

/// Registry of runs and their events.
#[derive(Debug, Default)]
pub struct RunLog {
    runs: DashMap<RunId, RunRecord>,
    events: DashMap<RunId, Vec<EngagementEvent>>,
    next_sequence: AtomicU64,
}

impl RunLog {
    /// Create an empty run log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a run has started.
    pub fn start_run(&self, ctx: &RunContext, system: SystemDetails) {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        self.runs.insert(
            ctx.run_id,
            RunRecord {
                run_id: ctx.run_id,
                system_id: ctx.system_id,
                status: RunStatus::Running,
                system,
                summary: None,
                error: None,
                sequence,
            },
        );
        debug!(run = %ctx.run_id, system = %ctx.system_id, "run started");
    }

    /// Mark a run completed with its summary.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] if the run was never started.
    pub fn complete_run(&self, run_id: RunId, summary: TrajectorySummary) -> Result<(), StoreError> {
        let mut record = self
            .runs
            .get_mut(&run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        record.status = RunStatus::Completed;
        record.summary = Some(summary);
        debug!(run = %run_id, "run completed");
        Ok(())
    }

    /// Mark a run failed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] if the run was never started.
    pub fn fail_run(&self, run_id: RunId, error: impl Into<String>) -> Result<(), StoreError> {
        let mut record = self
            .runs
            .get_mut(&run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        let error = error.into();
        warn!(run = %run_id, error = %error, "run failed");
        record.status = RunStatus::Failed;
        record.error = Some(error);
        Ok(())
    }

    /// Returns the record of a run, in any state.
    #[must_use]
    pub fn get_run(&self, run_id: RunId) -> Option<RunRecord> {
        self.runs.get(&run_id).map(|r| r.value().clone())
    }

    /// Returns the record of a run that has completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] or [`StoreError::RunNotCompleted`].
    pub fn completed_run(&self, run_id: RunId) -> Result<RunRecord, StoreError> {
        let record = self.get_run(run_id).ok_or(StoreError::RunNotFound(run_id))?;
        if record.status != RunStatus::Completed {
            return Err(StoreError::RunNotCompleted {
                run_id,
                status: record.status,
            });
        }
        Ok(record)
    }

    /// The most recently started runs, newest first.
    #[must_use]
    pub fn recent_runs(&self, limit: usize) -> Vec<RunRecord> {
        let mut runs: Vec<RunRecord> = self.runs.iter().map(|r| r.value().clone()).collect();
        runs.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        runs.truncate(limit);
        runs
    }

    /// Events of a completed run matching `filter`, ordered by timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] or [`StoreError::RunNotCompleted`].
    pub fn events(
        &self,
        run_id: RunId,
        filter: &EventFilter,
    ) -> Result<Vec<EngagementEvent>, StoreError> {
        self.completed_run(run_id)?;
        Ok(self
            .events
            .get(&run_id)
            .map(|events| analytics::filter_events(events.value(), filter))
            .unwrap_or_default())
    }

    /// Kinematic series of a completed run, rebuilt from its events.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] or [`StoreError::RunNotCompleted`].
    pub fn trajectory(&self, run_id: RunId) -> Result<TrajectorySeries, StoreError> {
        let events = self.events(run_id, &EventFilter::new())?;
        Ok(analytics::trajectory_from_events(&events))
    }

    /// Per-coil energy of a completed run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RunNotFound`] or [`StoreError::RunNotCompleted`].
    pub fn energy_consumption(&self, run_id: RunId) -> Result<EnergyBreakdown, StoreError> {
        let exits = self.events(run_id, &EventFilter::new().with_kind(EventKind::CoilExit))?;
        Ok(analytics::energy_by_coil(&exits))
    }

    /// Append events to a run. Shared access is enough; the per-run event
    /// lists live in a concurrent map.
    pub fn record_events(&self, ctx: &RunContext, events: &[EngagementEvent]) {
        self.events
            .entry(ctx.run_id)
            .or_default()
            .extend_from_slice(events);
        debug!(run = %ctx.run_id, count = events.len(), "recorded events");
    }
}

impl EventSink for RunLog {
    fn record(&mut self, ctx: &RunContext, events: &[EngagementEvent]) {
        self.record_events(ctx, events);
    }
}

/// Lets a shared log act as a sink: `run(&ctx, &system, &mut &log)`.
impl EventSink for &RunLog {
    fn record(&mut self, ctx: &RunContext, events: &[EngagementEvent]) {
        self.record_events(ctx, events);
    }
}
