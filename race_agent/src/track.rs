//! # Track
//!
//! The track is the fixed, cyclic sequence of waypoints along the racing line. It is created once
//! at the start of a run and never modified.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{io::Read, path::Path};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single point on the racing line.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Position of the waypoint in the world frame.
    ///
    /// Units: meters
    pub position_m: Vector3<f64>,
}

/// An ordered, cyclic sequence of waypoints.
///
/// A track always contains at least one waypoint, and all waypoints have finite positions.
#[derive(Debug, Clone)]
pub struct Track {
    waypoints: Vec<Waypoint>,
}

/// A row of a waypoint CSV file.
#[derive(Debug, Deserialize)]
struct WaypointRecord {
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Attempted to create a track with no waypoints")]
    Empty,

    #[error("Waypoint {0} has a non-finite position")]
    NonFiniteWaypoint(usize),

    #[error("Could not read the waypoint file: {0}")]
    CsvError(csv::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position_m: Vector3::new(x, y, z),
        }
    }

    /// Position of the waypoint projected onto the ground (XY) plane.
    pub fn position2(&self) -> Vector2<f64> {
        self.position_m.xy()
    }
}

impl Track {
    /// Create a new track from a sequence of waypoints.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, TrackError> {
        if waypoints.is_empty() {
            return Err(TrackError::Empty);
        }

        if let Some(i) = waypoints
            .iter()
            .position(|w| !w.position_m.iter().all(|c| c.is_finite()))
        {
            return Err(TrackError::NonFiniteWaypoint(i));
        }

        Ok(Self { waypoints })
    }

    /// Load a track from a CSV file.
    ///
    /// The file must have a header row with `x` and `y` columns, `z` is optional and defaults to
    /// zero.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        let reader = csv::Reader::from_path(path).map_err(TrackError::CsvError)?;
        Self::from_csv_reader(reader)
    }

    /// Load a track from CSV data in any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, TrackError> {
        Self::from_csv_reader(csv::Reader::from_reader(rdr))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, TrackError> {
        let mut waypoints = Vec::new();

        for record in reader.deserialize() {
            let record: WaypointRecord = record.map_err(TrackError::CsvError)?;
            waypoints.push(Waypoint::new(record.x, record.y, record.z));
        }

        Self::new(waypoints)
    }

    /// Number of waypoints in the track.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false, a track cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Wrap an index into the range of the track.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.waypoints.len()
    }

    /// Index `count` waypoints ahead of `index`, wrapping around the end of the track.
    ///
    /// `count` is reduced modulo the track length first so arbitrarily large lookaheads cannot
    /// overflow.
    pub fn ahead(&self, index: usize, count: usize) -> usize {
        self.wrap(self.wrap(index) + count % self.waypoints.len())
    }

    /// Get the waypoint at the given index, wrapping around the end of the track.
    pub fn get(&self, index: usize) -> &Waypoint {
        &self.waypoints[self.wrap(index)]
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
