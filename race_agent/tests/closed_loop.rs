//! Closed loop tests of the race agent driving a kinematic vehicle around a circular track.

mod common;

use color_eyre::Result;
use std::f64::consts::FRAC_PI_2;

use common::{circle_track, sim_vehicle, Bicycle};
use race_lib::{race_ctrl::Params, RaceAgent};

const RADIUS_M: f64 = 50.0;
const SPACING_M: f64 = 1.0;
const NUM_TICKS: usize = 2000;

struct RunSummary {
    /// Largest distance from the racing line after the start-up transient
    max_dev_m: f64,

    /// Largest distance from the racing line over the last 500 ticks
    settled_dev_m: f64,

    laps: usize,
    final_speed_ms: f64,
}

fn run(heading_offset_rad: f64) -> Result<RunSummary> {
    let track = circle_track(RADIUS_M, SPACING_M);
    let num_waypoints = track.len();

    // Start on the line at waypoint 0, where the track heads along +Y
    let (sensors, actuator) = sim_vehicle(Bicycle::new(RADIUS_M, 0.0, FRAC_PI_2 + heading_offset_rad));
    let model = sensors.0.clone();

    let mut agent = RaceAgent::new(Params::default(), track, sensors, actuator);
    agent.initialize()?;

    let mut summary = RunSummary {
        max_dev_m: 0.0,
        settled_dev_m: 0.0,
        laps: 0,
        final_speed_ms: 0.0,
    };
    let mut last_index = agent.race_ctrl().wp_index();

    for tick in 0..NUM_TICKS {
        let action = agent.step()?;

        assert!(action.is_valid(), "tick {}: {:?}", tick, action);
        assert!(!(action.throttle > 0.0 && action.brake > 0.0));
        assert_eq!(action.hand_brake, 0.0);
        assert_eq!(action.reverse, 0);

        let index = agent.race_ctrl().wp_index();
        if index + num_waypoints / 2 < last_index {
            summary.laps += 1;
        }
        last_index = index;

        let m = model.borrow();
        let dev_m = ((m.x_m.powi(2) + m.y_m.powi(2)).sqrt() - RADIUS_M).abs();
        if tick > 100 {
            summary.max_dev_m = summary.max_dev_m.max(dev_m);
        }
        if tick >= NUM_TICKS - 500 {
            summary.settled_dev_m = summary.settled_dev_m.max(dev_m);
        }
        summary.final_speed_ms = m.speed_ms;
    }

    Ok(summary)
}

#[test]
fn test_follows_circle() -> Result<()> {
    let summary = run(0.0)?;

    assert!(summary.max_dev_m < 3.0, "max deviation {} m", summary.max_dev_m);
    assert!(summary.settled_dev_m < 1.0, "settled deviation {} m", summary.settled_dev_m);
    assert!(summary.laps >= 3, "only {} laps", summary.laps);
    assert!(summary.final_speed_ms > 10.0, "final speed {} m/s", summary.final_speed_ms);

    Ok(())
}

#[test]
fn test_recovers_from_heading_offset() -> Result<()> {
    let summary = run(0.5)?;

    assert!(summary.max_dev_m < 3.0, "max deviation {} m", summary.max_dev_m);
    assert!(summary.settled_dev_m < 1.0, "settled deviation {} m", summary.settled_dev_m);
    assert!(summary.laps >= 3, "only {} laps", summary.laps);

    Ok(())
}

#[test]
fn test_stationary_start() -> Result<()> {
    let track = circle_track(RADIUS_M, SPACING_M);
    let (sensors, actuator) = sim_vehicle(Bicycle::new(RADIUS_M, 0.0, FRAC_PI_2));

    let mut agent = RaceAgent::new(Params::default(), track, sensors, actuator);
    agent.initialize()?;

    // At rest the agent pulls away at full throttle, steering fully towards
    // the near target
    let action = agent.step()?;
    let report = agent.last_report().copied().unwrap();

    assert!(report.stationary);
    assert_eq!(report.drive_value, 80.0);
    assert_eq!(action.throttle, 1.0);
    assert_eq!(action.brake, 0.0);
    assert_eq!(action.steer.abs(), 1.0);
    assert_eq!(action.steer, -report.near_head_err_rad.signum());
    assert_eq!(action.target_gear, 0);

    // Once moving the stationary law is no longer used
    agent.step()?;
    assert!(!agent.last_report().unwrap().stationary);

    Ok(())
}
