//! # coilgun_store
//!
//! In-memory collaborators for the simulation engine.
//!
//! This crate provides:
//!
//! - [`MemoryStore`]: a concurrent [`EntityStore`](coilgun_model::EntityStore)
//!   for tubes, coils, capsules and system configurations.
//! - [`Scenario`]: a JSON document describing a batch of entities.
//! - [`RunLog`]: run records and an [`EventSink`](coilgun_sim::EventSink)
//!   keyed by run id.
//! - [`codec`]: JSON and MessagePack encoding for reports.
//! - [`error`]: store error types.

pub mod codec;
pub mod error;
pub mod memory;
pub mod run_log;
pub mod scenario;

pub use codec::{ReportFormat, decode, encode};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use run_log::{RunLog, RunRecord, RunStatus};
pub use scenario::Scenario;
