//! Kernel error types.

/// A kinematic formula was evaluated outside its physical domain.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// `v0² + 2ad` is negative: the capsule stops before covering the distance.
    #[error(
        "capsule stops before covering {distance_m} m (v0 = {initial_velocity_mps} m/s, a = {acceleration_mps2} m/s²)"
    )]
    NegativeRadicand {
        initial_velocity_mps: f64,
        acceleration_mps2: f64,
        distance_m: f64,
    },

    /// The acceleration-time formula was asked to divide by a zero acceleration.
    #[error("acceleration time is undefined for zero acceleration; use the coast formula")]
    ZeroAcceleration,

    /// A positive distance cannot be covered at a non-positive velocity.
    #[error("capsule cannot cover {distance_m} m at {velocity_mps} m/s")]
    Stalled { velocity_mps: f64, distance_m: f64 },
}
