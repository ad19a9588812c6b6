//! Queries over a recorded event stream.
//!
//! These work from events alone, without the segments that produced them,
//! so they apply equally to a run just computed and to one read back from
//! an event log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use coilgun_model::CoilId;

use crate::aggregator::{SeriesPoint, TrajectorySeries};
use crate::events::{EngagementEvent, EventKind};

/// Selects events by kind and/or coil. An empty filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub kind: Option<EventKind>,
    pub coil_id: Option<CoilId>,
}

impl EventFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_coil(mut self, coil_id: impl Into<CoilId>) -> Self {
        self.coil_id = Some(coil_id.into());
        self
    }

    #[must_use]
    pub fn matches(&self, event: &EngagementEvent) -> bool {
        self.kind.is_none_or(|k| k == event.kind)
            && self.coil_id.is_none_or(|c| event.coil_id == Some(c))
    }
}

/// Matching events, ordered by timestamp. Ties keep their recorded order.
#[must_use]
pub fn filter_events(events: &[EngagementEvent], filter: &EventFilter) -> Vec<EngagementEvent> {
    let mut out: Vec<_> = events.iter().filter(|e| filter.matches(e)).cloned().collect();
    out.sort_by(|a, b| a.timestamp_s.total_cmp(&b.timestamp_s));
    out
}

/// Rebuild kinematic series from events, one sample per event.
///
/// Events that carry no acceleration, force or energy count as zero for
/// those series; the energy series is a running total.
#[must_use]
pub fn trajectory_from_events(events: &[EngagementEvent]) -> TrajectorySeries {
    let ordered = filter_events(events, &EventFilter::new());
    let mut out = TrajectorySeries::default();
    let mut energy_j = 0.0;

    for event in &ordered {
        let t = event.timestamp_s;
        out.position_m.push(SeriesPoint::new(t, event.position_m));
        out.velocity_mps.push(SeriesPoint::new(t, event.velocity_mps));
        out.acceleration_mps2
            .push(SeriesPoint::new(t, event.acceleration_mps2.unwrap_or(0.0)));
        out.force_applied_n
            .push(SeriesPoint::new(t, event.force_applied_n.unwrap_or(0.0)));
        energy_j += event.energy_consumed_j.unwrap_or(0.0);
        out.total_energy_consumed_j
            .push(SeriesPoint::new(t, energy_j));
    }
    out
}

/// Energy spent per coil.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub total_energy_consumed_j: f64,
    pub energy_by_coil: BTreeMap<CoilId, f64>,
    pub coil_count: usize,
}

/// Attribute energy to coils using their `coil_exit` events.
#[must_use]
pub fn energy_by_coil(events: &[EngagementEvent]) -> EnergyBreakdown {
    let mut energy_by_coil = BTreeMap::new();
    for event in events.iter().filter(|e| e.kind == EventKind::CoilExit) {
        if let (Some(coil_id), Some(energy_j)) = (event.coil_id, event.energy_consumed_j) {
            *energy_by_coil.entry(coil_id).or_insert(0.0) += energy_j;
        }
    }

    EnergyBreakdown {
        total_energy_consumed_j: energy_by_coil.values().sum(),
        coil_count: energy_by_coil.len(),
        energy_by_coil,
    }
}
