//! Test vehicles for the race agent integration tests.

#![allow(dead_code)]

use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use nalgebra::Vector3;
use race_lib::{
    track::{Track, Waypoint},
    vehicle_if::{Actuator, VehicleSensors},
    VehicleAction,
};
use util::maths::normalize_angle;

// ------------------------------------------------------------------------------------------------
// TRACKS
// ------------------------------------------------------------------------------------------------

/// Anticlockwise circular track centred on the origin.
pub fn circle_track(radius_m: f64, spacing_m: f64) -> Track {
    let n = (TAU * radius_m / spacing_m).round() as usize;

    Track::new(
        (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                Waypoint::new(radius_m * a.cos(), radius_m * a.sin(), 0.0)
            })
            .collect(),
    )
    .unwrap()
}

// ------------------------------------------------------------------------------------------------
// MOCKS
// ------------------------------------------------------------------------------------------------

/// Sensors returning fixed observations.
#[derive(Debug, Clone, Default)]
pub struct MockSensors {
    pub location_m: Vector3<f64>,
    pub rpy_rad: Vector3<f64>,
    pub velocity_ms: Vector3<f64>,
}

impl VehicleSensors for MockSensors {
    fn location_m(&self) -> Vector3<f64> {
        self.location_m
    }

    fn roll_pitch_yaw_rad(&self) -> Vector3<f64> {
        self.rpy_rad
    }

    fn velocity_ms(&self) -> Vector3<f64> {
        self.velocity_ms
    }
}

/// Actuator which records every action applied to it.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub actions: Vec<VehicleAction>,
}

impl Actuator for RecordingActuator {
    type Error = std::convert::Infallible;

    fn apply_action(&mut self, action: &VehicleAction) -> Result<(), Self::Error> {
        self.actions.push(*action);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The vehicle link is down")]
pub struct LinkDown;

/// Actuator which always fails.
pub struct FailingActuator;

impl Actuator for FailingActuator {
    type Error = LinkDown;

    fn apply_action(&mut self, _action: &VehicleAction) -> Result<(), Self::Error> {
        Err(LinkDown)
    }
}

// ------------------------------------------------------------------------------------------------
// KINEMATIC VEHICLE
// ------------------------------------------------------------------------------------------------

/// Kinematic bicycle model of a car on flat ground.
#[derive(Debug, Clone)]
pub struct Bicycle {
    pub x_m: f64,
    pub y_m: f64,
    pub heading_rad: f64,
    pub speed_ms: f64,

    pub dt_s: f64,
    pub wheelbase_m: f64,
    pub max_steer_rad: f64,
    pub max_accel_mss: f64,
    pub max_decel_mss: f64,
    pub drag_per_s: f64,
}

impl Bicycle {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            x_m,
            y_m,
            heading_rad,
            speed_ms: 0.0,
            dt_s: 0.05,
            wheelbase_m: 2.5,
            max_steer_rad: 0.6,
            max_accel_mss: 4.0,
            max_decel_mss: 8.0,
            drag_per_s: 0.2,
        }
    }

    /// Integrate the model over one time step with the given action.
    pub fn step(&mut self, action: &VehicleAction) {
        // Positive steer turns clockwise
        let wheel_angle_rad = -action.steer * self.max_steer_rad;

        let accel_mss = action.throttle * self.max_accel_mss
            - action.brake * self.max_decel_mss
            - self.drag_per_s * self.speed_ms;
        self.speed_ms = (self.speed_ms + accel_mss * self.dt_s).max(0.0);

        self.x_m += self.speed_ms * self.heading_rad.cos() * self.dt_s;
        self.y_m += self.speed_ms * self.heading_rad.sin() * self.dt_s;
        self.heading_rad = normalize_angle(
            self.heading_rad
                + self.speed_ms * wheel_angle_rad.tan() / self.wheelbase_m * self.dt_s,
        );
    }
}

/// Sensor side of a simulated vehicle.
#[derive(Clone)]
pub struct SimSensors(pub Rc<RefCell<Bicycle>>);

/// Actuator side of a simulated vehicle, each applied action advances the simulation one step.
pub struct SimActuator(pub Rc<RefCell<Bicycle>>);

/// Create the sensors and actuator of a simulated vehicle.
pub fn sim_vehicle(model: Bicycle) -> (SimSensors, SimActuator) {
    let model = Rc::new(RefCell::new(model));
    (SimSensors(model.clone()), SimActuator(model))
}

impl VehicleSensors for SimSensors {
    fn location_m(&self) -> Vector3<f64> {
        let m = self.0.borrow();
        Vector3::new(m.x_m, m.y_m, 0.0)
    }

    fn roll_pitch_yaw_rad(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, self.0.borrow().heading_rad)
    }

    fn velocity_ms(&self) -> Vector3<f64> {
        let m = self.0.borrow();
        Vector3::new(
            m.speed_ms * m.heading_rad.cos(),
            m.speed_ms * m.heading_rad.sin(),
            0.0,
        )
    }
}

impl Actuator for SimActuator {
    type Error = std::convert::Infallible;

    fn apply_action(&mut self, action: &VehicleAction) -> Result<(), Self::Error> {
        self.0.borrow_mut().step(action);
        Ok(())
    }
}
