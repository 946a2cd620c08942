//! # Communications interface crate.
//!
//! Provides the interface records exchanged between the race agent and the
//! vehicle platform.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command definitions for equipment (like the vehicle actuators)
pub mod eqpt;
