//! # coilgun_model
//!
//! The static description of a coil accelerator: what exists in the tube
//! before anything moves.
//!
//! This crate provides:
//!
//! - [`ids`]: strongly-typed identifiers for tubes, coils, capsules and systems.
//! - [`entity`]: [`Tube`], [`Capsule`] and [`Coil`] value types.
//! - [`config`]: [`SystemConfig`], the assembly of one tube, one capsule and
//!   a set of positioned coils.
//! - [`store`]: the [`EntityStore`] lookup trait the resolver depends on.

pub mod config;
pub mod entity;
pub mod ids;
pub mod store;

pub use config::{CoilPlacement, SystemConfig};
pub use entity::{Capsule, Coil, Tube};
pub use ids::{CapsuleId, CoilId, SystemId, TubeId};
pub use store::EntityStore;
