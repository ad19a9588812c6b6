//! Per-run context supplied by the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coilgun_model::SystemId;

/// Identifies one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Allocate a fresh random run id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run_{}", self.0.simple())
    }
}

/// Identity of a run, threaded through the runner and into event sinks.
///
/// Owned by the caller. Nothing in the engine remembers which run is
/// current, so independent runs never see each other's ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub run_id: RunId,
    pub system_id: SystemId,
}

impl RunContext {
    /// Create a context with a freshly allocated run id.
    #[must_use]
    pub fn new(system_id: impl Into<SystemId>) -> Self {
        Self {
            run_id: RunId::new(),
            system_id: system_id.into(),
        }
    }

    /// Use a caller-chosen run id instead of a random one.
    #[must_use]
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }
}
