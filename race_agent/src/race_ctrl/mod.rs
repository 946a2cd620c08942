//! # Race control module
//!
//! Race control is responsible for keeping the vehicle on the racing line at
//! speed. Once per tick it takes the vehicle's state and produces a single
//! `VehicleAction`.
//!
//! The racing line is a cyclic sequence of waypoints. The waypoint tracker
//! keeps an index of the waypoint the vehicle is currently at, which only
//! moves forwards around the track. From this index three targets are picked
//! further along the track, the faster the vehicle goes the further ahead
//! they are.
//!
//! The heading error to each target is the angle between the vehicle's
//! heading and the direction to the target. The near and leading errors are
//! blended to give the steering demand, while the near and brake errors
//! reduce the drive value, which is split into throttle and brake demands.
//! Large errors at high speed, i.e. a sharp turn coming up, result in
//! braking.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod controllers;
pub mod params;
pub mod state;
pub mod tracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use controllers::*;
pub use params::{Lookahead, Params};
pub use state::*;
