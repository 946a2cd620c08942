//! # Race agent library.
//!
//! Path tracking control for an autonomous racing vehicle. Given the waypoints of the racing line
//! and the vehicle's state each tick, the agent produces steer, throttle, brake and gear demands
//! which keep the vehicle on the line at speed.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Race agent - reads the sensors, runs race control and applies the action each tick
pub mod agent;

/// Localisation - the vehicle's state at each tick
pub mod loc;

/// Race control module - keeps the vehicle on the racing line
pub mod race_ctrl;

/// Track - the cyclic sequence of waypoints along the racing line
pub mod track;

/// Vehicle interface - traits implemented by the host platform
pub mod vehicle_if;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use agent::{AgentError, RaceAgent};
pub use comms_if::eqpt::vehicle::VehicleAction;
