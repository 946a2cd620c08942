//! Race control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector3;
use serde::Serialize;
use std::path::Path;

// Internal
use super::*;
use crate::{loc::VehicleState, track::Track};
use comms_if::eqpt::vehicle::VehicleAction;
use util::{
    archive::{Archived, Archiver, ArchiveError},
    module::State,
    session::Session
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Path of the status report archive relative to the session's archive root.
pub const STATUS_REPORT_ARCH_PATH: &str = "race_ctrl/status_report.csv";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Race control module state
#[derive(Default)]
pub struct RaceCtrl {
    params: Params,

    /// The track being followed, `None` until initialised
    track: Option<Track>,

    /// Index of the waypoint the vehicle is currently at
    wp_index: usize,

    /// Steering controller, holds the error memory between ticks
    steer_ctrl: SteerController,

    report: StatusReport,
    arch_report: Option<Archiver>,
}

/// Data required to initialise RaceCtrl.
pub struct InitData {
    pub params: Params,

    pub track: Track,

    /// Position of the vehicle at the start of the run.
    pub start_position_m: Vector3<f64>,
}

/// The status report containing monitoring quantities for a single tick.
#[derive(Debug, Default, Copy, Clone, Serialize)]
pub struct StatusReport {
    /// Speed of the vehicle
    pub speed_ms: f64,

    /// Index of the tracked waypoint
    pub wp_index: usize,

    /// Index of the near target
    pub near_index: usize,

    /// Index of the leading target
    pub leading_index: usize,

    /// Index of the brake target
    pub brake_index: usize,

    /// Heading error to the near target
    pub near_head_err_rad: f64,

    /// Heading error to the leading target
    pub leading_head_err_rad: f64,

    /// Heading error to the brake target
    pub brake_head_err_rad: f64,

    /// Blended near/leading error used for steering
    pub blended_err_rad: f64,

    /// Unclamped drive value the throttle and brake are split from
    pub drive_value: f64,

    /// If true the vehicle was stationary and the kick-off steering was used
    pub stationary: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during processing of the module.
#[derive(Debug, thiserror::Error)]
pub enum RaceCtrlError {
    /// Attempted to process before the module was initialised with a track.
    #[error("RaceCtrl has not been initialised")]
    NotInitialised,

    /// The vehicle state contained a NaN or infinite value. The tick is rejected without changing
    /// the tracked waypoint or the steering memory.
    #[error("The vehicle state contains non-finite values")]
    NonFiniteTelemetry,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RaceCtrl {
    type InitData = InitData;
    type InitError = RaceCtrlError;

    type InputData = VehicleState;
    type OutputData = VehicleAction;
    type StatusReport = StatusReport;
    type ProcError = RaceCtrlError;

    /// Initialise the RaceCtrl module.
    ///
    /// The tracked waypoint is seeded at the parameterised offset and then
    /// advanced from the start position.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        let InitData { params, track, start_position_m } = init_data;

        if !start_position_m.iter().all(|c| c.is_finite()) {
            return Err(RaceCtrlError::NonFiniteTelemetry);
        }

        self.wp_index = tracker::init_index(
            &start_position_m,
            params.init_index_offset,
            &track,
            params.proximity_threshold_m
        );
        self.steer_ctrl = SteerController::new();
        self.report = StatusReport::default();
        self.params = params;
        self.track = Some(track);

        Ok(())
    }

    /// Process race control.
    ///
    /// Processing involves:
    ///  1. Advancing the tracked waypoint to the vehicle's position.
    ///  1. Selecting the lookahead targets and calculating heading errors to
    ///     them.
    ///  1. Calculating the steer, throttle, brake and gear demands.
    fn proc(
        &mut self,
        input_data: &Self::InputData
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let track = match self.track {
            Some(ref t) => t,
            None => return Err(RaceCtrlError::NotInitialised)
        };

        if !input_data.is_finite() {
            return Err(RaceCtrlError::NonFiniteTelemetry);
        }

        // ---- TARGET MANAGEMENT ----

        let speed_ms = input_data.speed_ms();

        self.wp_index = tracker::advance(
            &input_data.position_m,
            self.wp_index,
            track,
            self.params.proximity_threshold_m
        );

        let targets = Targets::select(self.wp_index, speed_ms, track, &self.params);
        let errors = HeadingErrors::calc(input_data, &targets, track);

        // ---- COMMAND GENERATION ----

        let steer = self.steer_ctrl.get(&errors, speed_ms, &self.params);
        let speed = SpeedDemand::calc(&errors, speed_ms, &self.params);

        let action = VehicleAction {
            throttle: speed.throttle,
            steer: steer.steer,
            brake: speed.brake,
            hand_brake: 0.0,
            reverse: 0,
            target_gear: target_gear(speed_ms, &self.params),
        };

        self.report = StatusReport {
            speed_ms,
            wp_index: self.wp_index,
            near_index: targets.near,
            leading_index: targets.leading,
            brake_index: targets.brake,
            near_head_err_rad: errors.near_rad,
            leading_head_err_rad: errors.leading_rad,
            brake_head_err_rad: errors.brake_rad,
            blended_err_rad: steer.blended_err_rad,
            drive_value: speed.drive,
            stationary: steer.stationary,
        };

        debug!(
            "RaceCtrl: wp {}, speed {:.3} m/s, near err {:.4} rad, brake err {:.4} rad, steer {:.4}",
            self.wp_index,
            speed_ms,
            errors.near_rad,
            errors.brake_rad,
            action.steer
        );

        Ok((action, self.report))
    }
}

impl Archived for RaceCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.arch_report {
            Some(ref mut a) => a.serialise(self.report),
            None => Ok(())
        }
    }
}

impl RaceCtrl {
    /// Create a new, initialised, RaceCtrl.
    pub fn new(
        params: Params,
        track: Track,
        start_position_m: Vector3<f64>
    ) -> Result<Self, RaceCtrlError> {
        let mut ctrl = Self::default();
        ctrl.init(InitData { params, track, start_position_m })?;
        Ok(ctrl)
    }

    /// Start archiving the status report into the given session.
    pub fn archive_to(&mut self, session: &Session) -> Result<(), ArchiveError> {
        self.arch_report = Some(Archiver::from_path(
            session, STATUS_REPORT_ARCH_PATH
        )?);

        Ok(())
    }

    /// Start archiving the status report into the file at `path`.
    pub fn archive_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ArchiveError> {
        self.arch_report = Some(Archiver::open(path)?);

        Ok(())
    }

    /// Index of the waypoint the vehicle is currently at.
    pub fn wp_index(&self) -> usize {
        self.wp_index
    }

    /// Blended heading error remembered for the next tick.
    pub fn prev_blended_err_rad(&self) -> f64 {
        self.steer_ctrl.prev_blended_err_rad()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
