//! # Waypoint tracker
//!
//! Keeps track of the waypoint the vehicle is currently at. The tracked index only moves forwards
//! around the track, wrapping at the end.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector3;

use crate::track::Track;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Advance the tracked waypoint index.
///
/// Starting at `current_index`, scans forwards around the whole track and returns the index of the
/// first waypoint closer than `threshold_m` to `position_m` in the XY plane. If no waypoint is that
/// close `current_index` (wrapped into the track) is returned unchanged.
pub fn advance(
    position_m: &Vector3<f64>,
    current_index: usize,
    track: &Track,
    threshold_m: f64,
) -> usize {
    let start = track.wrap(current_index);
    let pos = position_m.xy();

    (start..start + track.len())
        .map(|i| track.wrap(i))
        .find(|&i| (track.get(i).position2() - pos).norm() < threshold_m)
        .unwrap_or(start)
}

/// Initial waypoint index for a vehicle starting at `position_m`.
///
/// The index is seeded at `offset` and then advanced once from the starting position.
pub fn init_index(
    position_m: &Vector3<f64>,
    offset: usize,
    track: &Track,
    threshold_m: f64,
) -> usize {
    advance(position_m, track.wrap(offset), track, threshold_m)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::Waypoint;

    fn square_track() -> Track {
        Track::new(vec![
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(10.0, 0.0, 0.0),
            Waypoint::new(10.0, 10.0, 0.0),
            Waypoint::new(0.0, 10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_advance_to_next() {
        let track = square_track();
        let pos = Vector3::new(9.5, 0.0, 0.0);

        assert_eq!(advance(&pos, 0, &track, 3.0), 1);
    }

    #[test]
    fn test_advance_ignores_height() {
        let track = square_track();
        let pos = Vector3::new(9.5, 0.0, 50.0);

        assert_eq!(advance(&pos, 0, &track, 3.0), 1);
    }

    #[test]
    fn test_advance_wraps() {
        let track = square_track();
        let pos = Vector3::new(0.5, 0.5, 0.0);

        // Scanning from 2 passes 3 and wraps round to 0
        assert_eq!(advance(&pos, 2, &track, 3.0), 0);
    }

    #[test]
    fn test_advance_first_match_wins() {
        let track = Track::new(vec![
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(1.0, 0.0, 0.0),
            Waypoint::new(2.0, 0.0, 0.0),
            Waypoint::new(20.0, 0.0, 0.0),
        ])
        .unwrap();

        // Waypoint 2 is closest, but 1 is the first in scan order within
        // the threshold
        let pos = Vector3::new(2.0, 0.0, 0.0);
        assert_eq!(advance(&pos, 1, &track, 3.0), 1);
        assert_eq!(advance(&pos, 3, &track, 3.0), 0);
    }

    #[test]
    fn test_advance_no_progress() {
        let track = square_track();
        let pos = Vector3::new(5.0, 5.0, 0.0);

        for i in 0..4 {
            assert_eq!(advance(&pos, i, &track, 3.0), i);
        }

        // Out of range indexes are wrapped
        assert_eq!(advance(&pos, 6, &track, 3.0), 2);
    }

    #[test]
    fn test_advance_threshold_is_strict() {
        let track = square_track();
        let pos = Vector3::new(7.0, 0.0, 0.0);

        assert_eq!(advance(&pos, 0, &track, 3.0), 0);
        assert_eq!(advance(&pos, 0, &track, 3.0 + 1e-9), 1);
    }

    #[test]
    fn test_advance_in_range_and_idempotent() {
        let track = Track::new(
            (0..40)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 40.0;
                    Waypoint::new(20.0 * a.cos(), 20.0 * a.sin(), 0.0)
                })
                .collect(),
        )
        .unwrap();

        for k in 0..200 {
            let a = k as f64 * 0.11;
            let r = 18.0 + (k % 5) as f64;
            let pos = Vector3::new(r * a.cos(), r * a.sin(), 0.0);

            for start in &[0usize, 7, 39, 55] {
                let idx = advance(&pos, *start, &track, 3.0);
                assert!(idx < track.len());

                // Advancing again from the same position must not move
                assert_eq!(advance(&pos, idx, &track, 3.0), idx);
            }
        }
    }

    #[test]
    fn test_init_index() {
        let track = square_track();

        // Offset 10 wraps to waypoint 2, scanning forwards finds waypoint 0
        let pos = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(init_index(&pos, 10, &track, 3.0), 0);

        // With nothing nearby the seeded offset is kept
        let pos = Vector3::new(5.0, 5.0, 0.0);
        assert_eq!(init_index(&pos, 10, &track, 3.0), 2);
    }
}
