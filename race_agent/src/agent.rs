//! # Race agent
//!
//! The agent ties race control to the vehicle. The host calls `initialize` once at the start of the
//! run and then `step` once per tick. Each step reads the sensors, runs race control and applies
//! the resulting action to the vehicle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use std::path::Path;

use crate::{
    loc::VehicleState,
    race_ctrl::{InitData, Params, RaceCtrl, RaceCtrlError, StatusReport},
    track::Track,
    vehicle_if::{Actuator, VehicleSensors},
};
use comms_if::eqpt::vehicle::VehicleAction;
use util::{
    archive::{ArchiveError, Archived},
    module::State,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct RaceAgent<S, A> {
    sensors: S,
    actuator: A,

    /// Parameters and track, held until the agent is initialised
    pending_init: Option<(Params, Track)>,

    race_ctrl: RaceCtrl,

    /// Report from the last successful tick
    last_report: Option<StatusReport>,

    archive: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("The agent has already been initialised")]
    AlreadyInitialised,

    #[error("Race control error: {0}")]
    RaceCtrl(RaceCtrlError),

    #[error("Could not apply the vehicle action: {0}")]
    Actuator(Box<dyn std::error::Error + Send + Sync>),

    #[error("Could not archive race control data: {0}")]
    Archive(ArchiveError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<S, A> RaceAgent<S, A>
where
    S: VehicleSensors,
    A: Actuator,
{
    pub fn new(params: Params, track: Track, sensors: S, actuator: A) -> Self {
        Self {
            sensors,
            actuator,
            pending_init: Some((params, track)),
            race_ctrl: RaceCtrl::default(),
            last_report: None,
            archive: false,
        }
    }

    /// Archive the race control status report every tick into the given session.
    pub fn archive_to(&mut self, session: &Session) -> Result<(), AgentError> {
        self.race_ctrl
            .archive_to(session)
            .map_err(AgentError::Archive)?;
        self.archive = true;

        Ok(())
    }

    /// Archive the race control status report every tick into the file at `path`.
    pub fn archive_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AgentError> {
        self.race_ctrl
            .archive_to_file(path)
            .map_err(AgentError::Archive)?;
        self.archive = true;

        Ok(())
    }

    /// Initialise the agent from the vehicle's current position.
    ///
    /// Initialisation can be retried if the sensors report a non-finite position.
    pub fn initialize(&mut self) -> Result<(), AgentError> {
        let seed = match self.pending_init {
            Some((ref params, ref track)) => track.wrap(params.init_index_offset),
            None => return Err(AgentError::AlreadyInitialised),
        };

        let state = self.read_state();
        if !state.position_m.iter().all(|c| c.is_finite()) {
            return Err(AgentError::RaceCtrl(RaceCtrlError::NonFiniteTelemetry));
        }

        if let Some((params, track)) = self.pending_init.take() {
            let num_waypoints = track.len();

            self.race_ctrl
                .init(InitData {
                    params,
                    track,
                    start_position_m: state.position_m,
                })
                .map_err(AgentError::RaceCtrl)?;

            info!(
                "RaceAgent initialised on a track of {} waypoints, seeded at waypoint {} and \
                 starting at waypoint {}",
                num_waypoints,
                seed,
                self.race_ctrl.wp_index()
            );
        }

        Ok(())
    }

    /// Run a single control tick, returning the action applied to the vehicle.
    ///
    /// If the sensors report non-finite values the tick is rejected by race control and a safe
    /// stop action is applied instead. A failure to archive the tick's status report is logged
    /// and does not stop the action being applied.
    pub fn step(&mut self) -> Result<VehicleAction, AgentError> {
        let state = self.read_state();

        let (action, processed) = match self.race_ctrl.proc(&state) {
            Ok((action, report)) => {
                self.last_report = Some(report);
                (action, true)
            }
            Err(RaceCtrlError::NonFiniteTelemetry) => {
                warn!("Non-finite vehicle state {:?}, applying safe stop", state);
                (VehicleAction::safe_stop(), false)
            }
            Err(e) => return Err(AgentError::RaceCtrl(e)),
        };

        self.actuator
            .apply_action(&action)
            .map_err(|e| AgentError::Actuator(Box::new(e)))?;

        if processed && self.archive {
            if let Err(e) = self.race_ctrl.write() {
                warn!("Could not archive race control data: {}", e);
            }
        }

        Ok(action)
    }

    /// Status report of the last tick race control processed.
    pub fn last_report(&self) -> Option<&StatusReport> {
        self.last_report.as_ref()
    }

    pub fn race_ctrl(&self) -> &RaceCtrl {
        &self.race_ctrl
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    fn read_state(&self) -> VehicleState {
        VehicleState::from_observations(
            self.sensors.location_m(),
            self.sensors.roll_pitch_yaw_rad(),
            self.sensors.velocity_ms(),
        )
    }
}
