//! # Race controllers module
//!
//! This module provides the steering and speed controllers used by RaceCtrl, including the heading
//! error calculations they operate on.
//!
//! Three targets are selected ahead of the tracked waypoint, further ahead the faster the vehicle
//! is going:
//!
//! - The near target drives both the steering and the throttle.
//! - The leading target smooths the steering through turns.
//! - The brake target looks far enough ahead to slow down before a turn is reached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::Serialize;
use util::maths::{normalize_angle, sign};

// Internal
use super::Params;
use crate::{loc::VehicleState, track::Track};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Indexes of the lookahead targets for a single tick.
#[derive(Debug, Copy, Clone, Default, Serialize, PartialEq)]
pub struct Targets {
    pub near: usize,
    pub leading: usize,
    pub brake: usize,
}

/// Heading errors to each of the lookahead targets.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct HeadingErrors {
    pub near_rad: f64,
    pub leading_rad: f64,
    pub brake_rad: f64,
}

/// The steering controller.
///
/// Remembers the blended heading error from the previous tick, which is fed back into the next
/// steering demand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SteerController {
    /// Previous blended heading error
    prev_blended_err_rad: f64,
}

/// Steering demand along with the quantities used to calculate it.
#[derive(Debug, Copy, Clone)]
pub struct SteerDemand {
    /// Normalised steer demand, [-1, 1]
    pub steer: f64,

    /// The blended near/leading heading error
    pub blended_err_rad: f64,

    /// True if the stationary kick-off law was used
    pub stationary: bool,
}

/// Throttle and brake demands.
#[derive(Debug, Copy, Clone)]
pub struct SpeedDemand {
    /// The unclamped drive value the demands are split from
    pub drive: f64,

    /// Normalised throttle, [0, 1]
    pub throttle: f64,

    /// Normalised brake, [0, 1]
    pub brake: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Targets {
    /// Select the lookahead targets ahead of `wp_index` for the given speed.
    pub fn select(wp_index: usize, speed_ms: f64, track: &Track, params: &Params) -> Self {
        Self {
            near: track.ahead(wp_index, params.near_lookahead.num_waypoints(speed_ms)),
            leading: track.ahead(wp_index, params.leading_lookahead.num_waypoints(speed_ms)),
            brake: track.ahead(wp_index, params.brake_lookahead.num_waypoints(speed_ms)),
        }
    }
}

impl HeadingErrors {
    /// Calculate the heading errors from the vehicle to each target.
    pub fn calc(state: &VehicleState, targets: &Targets, track: &Track) -> Self {
        let err = |i: usize| {
            heading_error(&state.position_m, state.heading_rad, &track.get(i).position_m)
        };

        Self {
            near_rad: err(targets.near),
            leading_rad: err(targets.leading),
            brake_rad: err(targets.brake),
        }
    }
}

impl SteerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blended heading error remembered from the previous tick.
    pub fn prev_blended_err_rad(&self) -> f64 {
        self.prev_blended_err_rad
    }

    /// Get the steering demand for the current errors and speed.
    ///
    /// When moving the demand is a proportional term on the blended error plus a term on the
    /// difference between the previous and current blended errors. When stationary the vehicle is
    /// steered fully towards the near target to get it moving in the right direction.
    ///
    /// The blended error is remembered for the next call in either case.
    pub fn get(&mut self, errors: &HeadingErrors, speed_ms: f64, params: &Params) -> SteerDemand {
        let blended_err_rad = (errors.near_rad + params.leading_weight * errors.leading_rad)
            / (1.0 + params.leading_weight);

        let stationary = speed_ms <= params.stationary_speed_ms;

        // The sense of the heading error is opposite to that of the steer, a
        // positive error (target to the left) needs a negative steer.
        let steer = if stationary {
            -sign(errors.near_rad)
        }
        else {
            -params.steer_k_p * blended_err_rad
                + params.steer_k_rate * (self.prev_blended_err_rad - blended_err_rad)
        };

        // Remember the error
        self.prev_blended_err_rad = blended_err_rad;

        SteerDemand {
            steer: steer.clamp(-1.0, 1.0),
            blended_err_rad,
            stationary,
        }
    }
}

impl SpeedDemand {
    /// Calculate the throttle and brake demands.
    ///
    /// The drive value falls from `drive_base` as the heading errors and speed increase. Its
    /// positive part becomes the throttle and its negative part the brake, so the two are never
    /// demanded together.
    pub fn calc(errors: &HeadingErrors, speed_ms: f64, params: &Params) -> Self {
        let drive = params.drive_base
            - (errors.near_rad * speed_ms).abs() / params.drive_head_divisor
            - params.drive_brake_gain
                * speed_ms
                * (errors.brake_rad * speed_ms.sqrt()).abs();

        Self {
            drive,
            throttle: drive.clamp(0.0, 1.0),
            brake: (-drive).clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the heading error from a vehicle to a target.
///
/// The error is the angle of the target in the XY plane relative to the vehicle's heading, in the
/// range (-pi, pi]. Positive errors mean the target is to the left (anticlockwise) of the heading.
pub fn heading_error(position_m: &Vector3<f64>, heading_rad: f64, target_m: &Vector3<f64>) -> f64 {
    let to_target = target_m.xy() - position_m.xy();

    normalize_angle(to_target[1].atan2(to_target[0]) - heading_rad)
}

/// Gear to select at the given speed.
pub fn target_gear(speed_ms: f64, params: &Params) -> i32 {
    (speed_ms / params.gear_speed_step_ms).floor() as i32
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
