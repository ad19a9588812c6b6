//! # coilgun_physics
//!
//! Closed-form one-dimensional kinematics for a capsule moving through a
//! tube. Every function is pure. Inputs that have no physical answer (a
//! capsule that stops before clearing a span, a zero acceleration fed to the
//! acceleration formula) come back as a [`KernelError`] instead of `NaN` or
//! infinity.

pub mod error;
pub mod kernel;

pub use error::KernelError;
pub use kernel::{acceleration, accel_time, coast_time, energy, final_velocity, span_time};
