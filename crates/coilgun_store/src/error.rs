//! Store error types.

use coilgun_sim::RunId;

use crate::run_log::RunStatus;

/// Errors raised by the in-memory store, the run log and the codec.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to encode a value to MessagePack.
    #[error("failed to encode MessagePack: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a value from MessagePack.
    #[error("failed to decode MessagePack: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No run with this id has been started.
    #[error("{0} not found")]
    RunNotFound(RunId),

    /// The run exists but has not completed.
    #[error("{run_id} is {status}, not completed")]
    RunNotCompleted { run_id: RunId, status: RunStatus },

    /// Two entities of the same kind share an id in one scenario.
    #[error("duplicate {kind} id {id} in scenario")]
    DuplicateId { kind: &'static str, id: u64 },
}
