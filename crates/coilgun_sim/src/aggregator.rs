//! Folding segments into time series and summary figures.

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// One sample of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub t_s: f64,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(t_s: f64, value: f64) -> Self {
        Self { t_s, value }
    }
}

/// Kinematic quantities against time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySeries {
    pub position_m: Vec<SeriesPoint>,
    pub velocity_mps: Vec<SeriesPoint>,
    pub acceleration_mps2: Vec<SeriesPoint>,
    pub force_applied_n: Vec<SeriesPoint>,
    /// Running total of energy consumed.
    pub total_energy_consumed_j: Vec<SeriesPoint>,
}

/// Headline figures of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub total_travel_time_s: f64,
    pub final_velocity_mps: f64,
    pub total_energy_consumed_j: f64,
}

/// Sample each segment at its start time.
///
/// Velocity is the segment's exit velocity: for an accel segment that is the
/// velocity the coil brings the capsule to, stamped at the segment's start.
/// The energy series is sampled at each segment's end, once its energy has
/// actually been spent.
#[must_use]
pub fn series(segments: &[Segment]) -> TrajectorySeries {
    let mut out = TrajectorySeries {
        position_m: Vec::with_capacity(segments.len()),
        velocity_mps: Vec::with_capacity(segments.len()),
        acceleration_mps2: Vec::with_capacity(segments.len()),
        force_applied_n: Vec::with_capacity(segments.len()),
        total_energy_consumed_j: Vec::with_capacity(segments.len()),
    };

    let mut energy_j = 0.0;
    for segment in segments {
        let t = segment.start_time_s();
        out.position_m
            .push(SeriesPoint::new(t, segment.start_position_m()));
        out.velocity_mps
            .push(SeriesPoint::new(t, segment.exit_velocity_mps()));
        out.acceleration_mps2
            .push(SeriesPoint::new(t, segment.acceleration_mps2()));
        out.force_applied_n
            .push(SeriesPoint::new(t, segment.force_applied_n()));

        energy_j += segment.energy_consumed_j();
        out.total_energy_consumed_j
            .push(SeriesPoint::new(segment.end_time_s(), energy_j));
    }
    out
}

/// Sum up a segment list. An empty list summarises to all zeros.
#[must_use]
pub fn summarize(segments: &[Segment]) -> TrajectorySummary {
    let total_travel_time_s = segments.iter().map(Segment::traverse_time_s).sum();
    let final_velocity_mps = segments
        .last()
        .map_or(0.0, Segment::exit_velocity_mps);
    let total_energy_consumed_j = segments
        .iter()
        .map(|s| match s {
            Segment::Accel(a) => a.energy_consumed_j,
            Segment::Coast(_) => 0.0,
        })
        .sum();

    TrajectorySummary {
        total_travel_time_s,
        final_velocity_mps,
        total_energy_consumed_j,
    }
}

#[cfg(test)]
mod tests {
    use coilgun_model::CoilId;

    use super::*;
    use crate::segment::{AccelSegment, CoastSegment};

    fn segments() -> Vec<Segment> {
        vec![
            Segment::Coast(CoastSegment {
                id: 1,
                start_time_s: 0.0,
                start_position_m: 0.0,
                length_m: 5.0,
                velocity_mps: 1.0,
                traverse_time_s: 5.0,
                related_coil_id: Some(CoilId(1)),
            }),
            Segment::Accel(AccelSegment {
                id: 2,
                start_time_s: 5.0,
                start_position_m: 5.0,
                length_m: 1.0,
                start_velocity_mps: 1.0,
                final_velocity_mps: 3.0,
                acceleration_mps2: 4.0,
                force_applied_n: 8.0,
                traverse_time_s: 0.5,
                energy_consumed_j: 8.0,
                related_coil_id: CoilId(1),
            }),
            Segment::Coast(CoastSegment {
                id: 3,
                start_time_s: 5.5,
                start_position_m: 6.0,
                length_m: 3.0,
                velocity_mps: 3.0,
                traverse_time_s: 1.0,
                related_coil_id: Some(CoilId(1)),
            }),
        ]
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&segments());
        assert!((summary.total_travel_time_s - 6.5).abs() < 1e-12);
        assert_eq!(summary.final_velocity_mps, 3.0);
        assert_eq!(summary.total_energy_consumed_j, 8.0);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(summarize(&[]), TrajectorySummary::default());
    }

    #[test]
    fn test_series_one_point_per_segment() {
        let s = series(&segments());
        assert_eq!(s.position_m.len(), 3);
        assert_eq!(s.velocity_mps[1], SeriesPoint::new(5.0, 3.0));
        assert_eq!(s.acceleration_mps2[1], SeriesPoint::new(5.0, 4.0));
        assert_eq!(s.acceleration_mps2[2].value, 0.0);
        assert_eq!(s.force_applied_n[1].value, 8.0);
        assert_eq!(s.position_m[2], SeriesPoint::new(5.5, 6.0));
    }

    #[test]
    fn test_velocity_series_uses_exit_velocity() {
        let s = series(&segments());
        let velocity: Vec<_> = s.velocity_mps.iter().map(|p| (p.t_s, p.value)).collect();
        assert_eq!(velocity, vec![(0.0, 1.0), (5.0, 3.0), (5.5, 3.0)]);
    }

    #[test]
    fn test_energy_series_is_cumulative_at_segment_end() {
        let s = series(&segments());
        let energy: Vec<_> = s.total_energy_consumed_j.iter().map(|p| p.value).collect();
        assert_eq!(energy, vec![0.0, 8.0, 8.0]);
        assert_eq!(s.total_energy_consumed_j[1].t_s, 5.5);
    }
}
