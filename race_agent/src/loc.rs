//! # Localisation module
//!
//! Provides the per-tick snapshot of the vehicle's position, heading and velocity in the world
//! frame.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Vector2, Vector3};
use serde::Serialize;
use util::maths::normalize_angle;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Index of yaw in a roll/pitch/yaw observation.
pub const YAW_INDEX: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The state of the vehicle at a single control tick.
#[derive(Debug, Copy, Clone, Serialize, Default)]
pub struct VehicleState {
    /// The position in the world frame
    ///
    /// Units: meters
    pub position_m: Vector3<f64>,

    /// Heading of the vehicle (angle to the positive world X axis), in the range (-pi, pi].
    ///
    /// Units: radians
    pub heading_rad: f64,

    /// The velocity in the world frame
    ///
    /// Units: meters/second
    pub velocity_ms: Vector3<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VehicleState {
    /// Build the state from raw sensor observations.
    ///
    /// Only the yaw component of `rpy_rad` is used.
    pub fn from_observations(
        location_m: Vector3<f64>,
        rpy_rad: Vector3<f64>,
        velocity_ms: Vector3<f64>,
    ) -> Self {
        Self {
            position_m: location_m,
            heading_rad: normalize_angle(rpy_rad[YAW_INDEX]),
            velocity_ms,
        }
    }

    /// Magnitude of the velocity vector.
    pub fn speed_ms(&self) -> f64 {
        self.velocity_ms.norm()
    }

    /// Position projected onto the ground (XY) plane.
    pub fn position2(&self) -> Vector2<f64> {
        self.position_m.xy()
    }

    /// Returns true if every quantity in the state is finite.
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|c| c.is_finite())
            && self.heading_rad.is_finite()
            && self.velocity_ms.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_from_observations() {
        let state = VehicleState::from_observations(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.1, 0.2, 1.5 * PI),
            Vector3::new(3.0, 4.0, 0.0),
        );

        assert!((state.heading_rad + 0.5 * PI).abs() < 1e-12);
        assert_eq!(state.speed_ms(), 5.0);
        assert_eq!(state.position2(), Vector2::new(1.0, 2.0));
        assert!(state.is_finite());
    }

    #[test]
    fn test_non_finite() {
        let state = VehicleState::from_observations(
            Vector3::new(std::f64::NAN, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::zeros(),
        );
        assert!(!state.is_finite());

        let state = VehicleState::from_observations(
            Vector3::zeros(),
            Vector3::zeros(),
            Vector3::new(0.0, std::f64::INFINITY, 0.0),
        );
        assert!(!state.is_finite());
    }
}
