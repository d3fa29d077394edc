use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{haversine_distance_sequence, stillness_flags_with_radius, turn_angle_sequence_with_radius, validate::validate_track, MotionError};

use super::track_point::TrackPoint;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSession {
    pub title: String,
    pub start_time: Option<DateTime<Utc>>,
    pub track_points: Vec<TrackPoint>,
}

/// Motion metrics of one point of a session.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub index: usize,
    pub longitude: f64,
    pub latitude: f64,
    /// Meters from the previous point, 0 for the first.
    pub distance: f64,
    /// Radians, missing at the first and last point.
    pub turn_angle: Option<f64>,
    pub still: bool,
}

impl TrackSession {
    pub fn new(title: String, start_time: Option<DateTime<Utc>>, track_points: Vec<TrackPoint>) -> Self {
        Self {
            title,
            start_time,
            track_points,
        }
    }

    fn columns(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<u32>) {
        let lons = self.track_points.iter().map(TrackPoint::longitude).collect();
        let lats = self.track_points.iter().map(TrackPoint::latitude).collect();
        let accuracy = self.track_points.iter().map(|p| p.accuracy).collect();
        let segments = self.track_points.iter().map(|p| p.segment).collect();
        (lons, lats, accuracy, segments)
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        let (lons, lats, accuracy, _) = self.columns();
        validate_track(&lons, &lats, &accuracy)
    }

    /// Distance, turn angle and stillness of every point, using segments as group keys.
    pub fn motion_profile(&self, radius_m: f64) -> Result<Vec<MotionSample>, MotionError> {
        let (lons, lats, accuracy, segments) = self.columns();

        let distances = haversine_distance_sequence(&lons, &lats, radius_m)?;
        let angles = turn_angle_sequence_with_radius(&lons, &lats, &distances, radius_m)?;
        let still = stillness_flags_with_radius(&accuracy, &lons, &lats, &segments, radius_m)?;

        let samples: Vec<MotionSample> = (0..lons.len())
            .map(|i| MotionSample {
                index: i,
                longitude: lons[i],
                latitude: lats[i],
                distance: distances[i],
                turn_angle: angles[i],
                still: still[i],
            })
            .collect();

        tracing::debug!(
            "Profiled session {:?}: {} points, {} still",
            self.title,
            samples.len(),
            samples.iter().filter(|s| s.still).count()
        );

        Ok(samples)
    }

    /// Length of the track in meters. Distances across segment boundaries are included.
    pub fn total_distance(&self, radius_m: f64) -> Result<f64, MotionError> {
        let (lons, lats, _, _) = self.columns();
        Ok(haversine_distance_sequence(&lons, &lats, radius_m)?.iter().sum())
    }

    pub fn still_count(&self, radius_m: f64) -> Result<usize, MotionError> {
        let (lons, lats, accuracy, segments) = self.columns();
        Ok(stillness_flags_with_radius(&accuracy, &lons, &lats, &segments, radius_m)?.into_iter().filter(|s| *s).count())
    }
}

#[cfg(test)]
fn session(points: &[(f64, f64, f64, u32)]) -> TrackSession {
    let track_points = points
        .iter()
        .map(|&(lon, lat, acc, seg)| TrackPoint::new(geo_types::Point::new(lon, lat), acc, seg, None))
        .collect();
    TrackSession::new("test".into(), None, track_points)
}

#[test]
fn profile_combines_all_metrics() {
    let session = session(&[
        (0., 0.001, 5., 0),
        (0., 0., 5., 0),
        (0., 0., 5., 0),
        (0.001, 0., 5., 0),
        (0.002, 0., 5., 1),
    ]);
    let profile = session.motion_profile(crate::EARTH_RADIUS_METERS).unwrap();

    assert_eq!(profile.len(), 5);
    assert_eq!(profile.iter().map(|s| s.index).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(profile[0].distance, 0.);
    assert!((profile[1].distance - 111.32).abs() < 0.01);
    assert_eq!(profile[2].distance, 0.);

    assert_eq!(profile[0].turn_angle, None);
    assert_eq!(profile[4].turn_angle, None);
    // index 2 repeats index 1, so the angle at it is undefined
    assert!(profile[2].turn_angle.unwrap().is_nan());
    assert!((profile[3].turn_angle.unwrap() - std::f64::consts::PI).abs() < 1e-6);

    assert_eq!(profile.iter().map(|s| s.still).collect::<Vec<_>>(), vec![false, false, true, false, false]);
    assert_eq!(session.still_count(crate::EARTH_RADIUS_METERS).unwrap(), 1);
}

#[test]
fn total_distance_sums_steps() {
    let session = session(&[(0., 0., 1., 0), (0., 0.001, 1., 0), (0., 0.002, 1., 0)]);
    let total = session.total_distance(crate::EARTH_RADIUS_METERS).unwrap();
    assert!((total - 222.64).abs() < 0.01, "{total}");
}

#[test]
fn empty_session() {
    let session = session(&[]);
    assert!(session.motion_profile(crate::EARTH_RADIUS_METERS).unwrap().is_empty());
    assert_eq!(session.total_distance(crate::EARTH_RADIUS_METERS).unwrap(), 0.);
    assert!(session.validate().is_ok());
}

#[test]
fn validate_reports_point_index() {
    let session = session(&[(0., 0., 1., 0), (200., 0., 1., 0)]);
    assert!(matches!(session.validate(), Err(MotionError::InvalidInput { index: Some(1), .. })));
}

#[test]
fn profile_with_other_radius() {
    let session = session(&[(0., 0.001, 5., 0), (0., 0., 5., 0), (0.001, 0., 5., 0)]);
    for radius in [6_371_000., 6_378.137] {
        let profile = session.motion_profile(radius).unwrap();
        let angle = profile[1].turn_angle.unwrap();
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-6, "radius {radius}: {angle}");
    }

    let total = session.total_distance(6_371_000.).unwrap();
    assert!((total - 2. * 111.1949).abs() < 0.01, "{total}");

    // on a sphere of 6378 m the steps are 0.11 m, well within the 10 m combined accuracy
    assert_eq!(session.still_count(crate::EARTH_RADIUS_METERS).unwrap(), 0);
    assert_eq!(session.still_count(6_378.137).unwrap(), 2);
}
