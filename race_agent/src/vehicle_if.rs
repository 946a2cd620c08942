//! # Vehicle interface
//!
//! The race agent does not own the vehicle. Sensor observations and actuator commands pass through
//! the traits in this module, which the host platform implements.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::vehicle::VehicleAction;
use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Source of vehicle observations.
///
/// Each method returns the last known value of its quantity. Implementors are responsible for
/// always having a value available, the agent does not retry or compensate for missing data.
pub trait VehicleSensors {
    /// Position of the vehicle in the world frame.
    ///
    /// Units: meters
    fn location_m(&self) -> Vector3<f64>;

    /// Roll, pitch and yaw of the vehicle, in that order.
    ///
    /// Units: radians
    fn roll_pitch_yaw_rad(&self) -> Vector3<f64>;

    /// Velocity of the vehicle in the world frame.
    ///
    /// Units: meters/second
    fn velocity_ms(&self) -> Vector3<f64>;
}

/// Sink for vehicle actions.
pub trait Actuator {
    /// Error raised when an action could not be applied.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply the action to the vehicle, blocking until the platform has accepted it.
    fn apply_action(&mut self, action: &VehicleAction) -> Result<(), Self::Error>;
}
