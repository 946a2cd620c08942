//! # Vehicle Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An action applied to the vehicle's actuators for a single control tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct VehicleAction {
    /// Normalised throttle demand in the range [0, 1].
    pub throttle: f64,

    /// Normalised steering demand in the range [-1, 1].
    ///
    /// Positive steer turns the vehicle clockwise about the world up axis (to the right),
    /// negative steer turns it anticlockwise (to the left).
    pub steer: f64,

    /// Normalised brake demand in the range [0, 1].
    pub brake: f64,

    /// Hand brake demand, 0 is released.
    pub hand_brake: f64,

    /// Reverse flag, 0 is forwards.
    pub reverse: i32,

    /// The gear the transmission should select.
    pub target_gear: i32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VehicleAction {
    /// An action which releases the throttle, centres the steering and applies full brake.
    pub fn safe_stop() -> Self {
        Self {
            throttle: 0.0,
            steer: 0.0,
            brake: 1.0,
            hand_brake: 0.0,
            reverse: 0,
            target_gear: 0,
        }
    }

    /// Returns true if all demands are finite and within their actuator ranges.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.throttle)
            && (-1.0..=1.0).contains(&self.steer)
            && (0.0..=1.0).contains(&self.brake)
            && self.hand_brake.is_finite()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
