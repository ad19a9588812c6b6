//! Kinematic formulas.
//!
//! Units are SI throughout. Velocities are along the tube axis; the capsule
//! never moves backwards, so a velocity is only meaningful while positive.

use crate::error::KernelError;

/// Time to cover `distance_m` at a constant `velocity_mps`.
///
/// A zero distance takes zero time at any velocity.
///
/// # Errors
///
/// Returns [`KernelError::Stalled`] if `velocity_mps <= 0` and there is
/// distance left to cover.
pub fn coast_time(velocity_mps: f64, distance_m: f64) -> Result<f64, KernelError> {
    if distance_m == 0.0 {
        return Ok(0.0);
    }
    if velocity_mps <= 0.0 {
        return Err(KernelError::Stalled {
            velocity_mps,
            distance_m,
        });
    }
    Ok(distance_m / velocity_mps)
}

/// Newton's second law, `a = F / m`. Negative force gives a deceleration.
#[must_use]
pub fn acceleration(force_n: f64, mass_kg: f64) -> f64 {
    force_n / mass_kg
}

/// Velocity after accelerating at `acceleration_mps2` over `distance_m`,
/// `sqrt(v0² + 2ad)`.
///
/// # Errors
///
/// Returns [`KernelError::NegativeRadicand`] when the deceleration is strong
/// enough to stop the capsule before it covers the distance.
pub fn final_velocity(
    initial_velocity_mps: f64,
    acceleration_mps2: f64,
    distance_m: f64,
) -> Result<f64, KernelError> {
    let radicand = initial_velocity_mps.powi(2) + 2.0 * acceleration_mps2 * distance_m;
    if radicand < 0.0 {
        return Err(KernelError::NegativeRadicand {
            initial_velocity_mps,
            acceleration_mps2,
            distance_m,
        });
    }
    Ok(radicand.sqrt())
}

/// Time to change velocity from `v0` to `v1` at constant acceleration,
/// `(v1 - v0) / a`.
///
/// # Errors
///
/// Returns [`KernelError::ZeroAcceleration`] if `acceleration_mps2 == 0`.
/// Constant-velocity spans go through [`coast_time`].
pub fn accel_time(
    initial_velocity_mps: f64,
    final_velocity_mps: f64,
    acceleration_mps2: f64,
) -> Result<f64, KernelError> {
    if acceleration_mps2 == 0.0 {
        return Err(KernelError::ZeroAcceleration);
    }
    Ok((final_velocity_mps - initial_velocity_mps) / acceleration_mps2)
}

/// Time to cover `distance_m` while the velocity changes linearly from
/// `v0` to `v1`, `2d / (v0 + v1)`.
///
/// Equal to [`accel_time`] for the same span, but without the `v1 - v0`
/// cancellation when the acceleration is tiny next to `v0² / d`.
///
/// # Errors
///
/// Returns [`KernelError::Stalled`] if `v0 + v1 <= 0` and there is distance
/// left to cover.
pub fn span_time(
    initial_velocity_mps: f64,
    final_velocity_mps: f64,
    distance_m: f64,
) -> Result<f64, KernelError> {
    if distance_m == 0.0 {
        return Ok(0.0);
    }
    let sum_mps = initial_velocity_mps + final_velocity_mps;
    if sum_mps <= 0.0 {
        return Err(KernelError::Stalled {
            velocity_mps: initial_velocity_mps,
            distance_m,
        });
    }
    Ok(2.0 * distance_m / sum_mps)
}

/// Work done by `force_n` over `distance_m`. Signed: a decelerating coil
/// gives negative energy.
#[must_use]
pub fn energy(force_n: f64, distance_m: f64) -> f64 {
    force_n * distance_m
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_coast_time() {
        assert!((coast_time(2.0, 10.0).unwrap() - 5.0).abs() < EPS);
    }

    #[test]
    fn test_coast_time_zero_distance() {
        assert_eq!(coast_time(3.0, 0.0).unwrap(), 0.0);
        assert_eq!(coast_time(0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_coast_time_stalled() {
        let err = coast_time(0.0, 1.0).unwrap_err();
        assert!(matches!(err, KernelError::Stalled { .. }));
        assert!(coast_time(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_acceleration_sign_follows_force() {
        assert!((acceleration(10.0, 2.0) - 5.0).abs() < EPS);
        assert!((acceleration(-10.0, 2.0) + 5.0).abs() < EPS);
    }

    #[test]
    fn test_final_velocity() {
        let v = final_velocity(1.0, 10.0, 1.0).unwrap();
        assert!((v - 21.0_f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_final_velocity_exact_stop() {
        // v0² = 2|a|d: the capsule stops right at the end.
        let v = final_velocity(2.0, -2.0, 1.0).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_final_velocity_negative_radicand() {
        let err = final_velocity(1.0, -10.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            KernelError::NegativeRadicand {
                initial_velocity_mps: 1.0,
                acceleration_mps2: -10.0,
                distance_m: 1.0,
            }
        );
    }

    #[test]
    fn test_accel_time() {
        let v1 = 21.0_f64.sqrt();
        let t = accel_time(1.0, v1, 10.0).unwrap();
        assert!((t - (v1 - 1.0) / 10.0).abs() < EPS);
        assert!((t - 0.358_257_569_5).abs() < 1e-6);
    }

    #[test]
    fn test_accel_time_zero_distance_is_instant() {
        let v1 = final_velocity(4.0, 7.0, 0.0).unwrap();
        assert_eq!(accel_time(4.0, v1, 7.0).unwrap(), 0.0);
    }

    #[test]
    fn test_accel_time_rejects_zero_acceleration() {
        assert_eq!(
            accel_time(1.0, 1.0, 0.0).unwrap_err(),
            KernelError::ZeroAcceleration
        );
    }

    #[test]
    fn test_span_time_matches_accel_time() {
        let v1 = 21.0_f64.sqrt();
        let t = span_time(1.0, v1, 1.0).unwrap();
        assert!((t - accel_time(1.0, v1, 10.0).unwrap()).abs() < EPS);
    }

    #[test]
    fn test_span_time_exact_stop() {
        assert!((span_time(2.0, 0.0, 1.0).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_span_time_keeps_precision_for_tiny_acceleration() {
        let v1 = final_velocity(1000.0, 1e-12, 1.0).unwrap();
        assert_eq!(accel_time(1000.0, v1, 1e-12).unwrap(), 0.0);
        let t = span_time(1000.0, v1, 1.0).unwrap();
        assert!((t - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_span_time_zero_distance_and_stall() {
        assert_eq!(span_time(0.0, 0.0, 0.0).unwrap(), 0.0);
        assert!(matches!(
            span_time(0.0, 0.0, 1.0).unwrap_err(),
            KernelError::Stalled { .. }
        ));
    }

    #[test]
    fn test_energy_is_signed() {
        assert!((energy(10.0, 1.0) - 10.0).abs() < EPS);
        assert!((energy(-4.0, 0.5) + 2.0).abs() < EPS);
    }
}
