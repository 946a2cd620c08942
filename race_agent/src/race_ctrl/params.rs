//! Race control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for race control
///
/// Any parameter missing from a parameter file takes its default value.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Params {

    // ---- WAYPOINT TRACKING ----

    /// Distance from the vehicle under which a waypoint is considered
    /// reached.
    ///
    /// Units: meters
    pub proximity_threshold_m: f64,

    /// Index the tracked waypoint is seeded at before the first advance pass.
    pub init_index_offset: usize,

    // ---- LOOKAHEAD ----

    /// Lookahead of the near target, used for steering and throttle.
    pub near_lookahead: Lookahead,

    /// Lookahead of the leading target, used for steering.
    pub leading_lookahead: Lookahead,

    /// Lookahead of the brake target, used to slow down ahead of turns.
    pub brake_lookahead: Lookahead,

    // ---- STEERING ----

    /// Weight of the leading heading error relative to the near heading
    /// error in the blended steering error.
    pub leading_weight: f64,

    /// Gain on the blended heading error
    pub steer_k_p: f64,

    /// Gain on the difference between the previous and current blended
    /// heading errors
    pub steer_k_rate: f64,

    /// Speed at or below which the vehicle is considered stationary.
    ///
    /// Units: meters/second
    pub stationary_speed_ms: f64,

    // ---- SPEED ----

    /// Drive value with no heading error.
    pub drive_base: f64,

    /// Divisor applied to the near heading error/speed product.
    pub drive_head_divisor: f64,

    /// Gain on the brake heading error term.
    pub drive_brake_gain: f64,

    /// Speed range covered by each gear.
    ///
    /// Units: meters/second
    pub gear_speed_step_ms: f64,
}

/// Speed dependent lookahead, as a number of waypoints.
///
/// The lookahead is `floor(speed / speed_divisor_ms + base_offset)`.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Lookahead {
    /// Units: meters/second
    pub speed_divisor_ms: f64,

    pub base_offset: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            proximity_threshold_m: 3.0,
            init_index_offset: 10,
            near_lookahead: Lookahead {
                speed_divisor_ms: 5.0,
                base_offset: 1.0,
            },
            leading_lookahead: Lookahead {
                speed_divisor_ms: 2.5,
                base_offset: 2.0,
            },
            brake_lookahead: Lookahead {
                speed_divisor_ms: 1.0,
                base_offset: 2.0,
            },
            leading_weight: 0.5,
            steer_k_p: 1.0,
            steer_k_rate: 2.0,
            stationary_speed_ms: 1e-2,
            drive_base: 80.0,
            drive_head_divisor: 3.0,
            drive_brake_gain: 2.0,
            gear_speed_step_ms: 15.0,
        }
    }
}

impl Lookahead {
    /// Number of waypoints to look ahead at the given speed.
    pub fn num_waypoints(&self, speed_ms: f64) -> usize {
        // Negative or NaN lookaheads saturate to zero
        (speed_ms / self.speed_divisor_ms + self.base_offset).floor() as usize
    }
}
