//! # coilgun_sim
//!
//! Trajectory segmentation for a capsule driven through a tube by coils.
//!
//! A run goes through three stages, each a plain function of its input:
//!
//! 1. [`resolver`]: look up and validate a [`SystemConfig`](coilgun_model::SystemConfig),
//!    ordering coils by position into a [`ResolvedSystem`].
//! 2. [`builder`]: walk the resolved system once, producing [`Segment`]s
//!    and [`EngagementEvent`]s.
//! 3. [`aggregator`]: fold segments into time series and a
//!    [`TrajectorySummary`].
//!
//! [`simulate`] chains stages 2 and 3; [`run`] adds logging and an
//! [`EventSink`]. [`analytics`] answers questions about recorded events.
//!
//! ## Usage
//!
//! ```rust
//! use coilgun_model::{Capsule, Coil, Tube};
//! use coilgun_sim::{PositionedCoil, ResolvedSystem, simulate};
//!
//! let system = ResolvedSystem::new(
//!     Tube::new(1, 10.0),
//!     Capsule::new(1, 1.0, 1.0),
//!     vec![PositionedCoil::new(Coil::new(1, 2.0, 10.0), 4.0)],
//! )
//! .unwrap();
//!
//! let outcome = simulate(&system).unwrap();
//! assert_eq!(outcome.summary.total_energy_consumed_j, 10.0);
//! ```

pub mod aggregator;
pub mod analytics;
pub mod builder;
pub mod context;
pub mod error;
pub mod events;
pub mod resolver;
pub mod runner;
pub mod segment;

pub use aggregator::{SeriesPoint, TrajectorySeries, TrajectorySummary};
pub use analytics::{EnergyBreakdown, EventFilter};
pub use context::{RunContext, RunId};
pub use error::{EntityKind, SimResult, SimulationError};
pub use events::{EngagementEvent, EventKind, EventSink, VecSink};
pub use resolver::{PositionedCoil, ResolvedSystem, SystemDetails, resolve};
pub use runner::{SimulationOutcome, SimulationReport, run, simulate};
pub use segment::{AccelSegment, CoastSegment, Segment};
