use geo_types::Point;

use crate::{haversine_distance, haversine_distance_with_radius, MotionError, EARTH_RADIUS_METERS};

/// Angle in radians at `b` of the triangle `a`, `b`, `c`, from the law of cosines over the
/// three haversine side lengths.
///
/// A straight line through `b` gives pi, turning back the way you came gives 0. If `b`
/// coincides with `a` or `c` the angle is undefined and NaN is returned.
pub fn turn_angle(a: Point, b: Point, c: Point) -> f64 {
    let ab = haversine_distance(a, b);
    let bc = haversine_distance(b, c);
    let ac = haversine_distance(a, c);
    angle_from_sides(ab, bc, ac)
}

/// Turn angle at every interior point of a track.
///
/// `distances` must be the consecutive distances of the same track, as returned by
/// [`crate::haversine_distance_sequence`]. The first and last points have no angle and are
/// `None`.
pub fn turn_angle_sequence(lons: &[f64], lats: &[f64], distances: &[f64]) -> Result<Vec<Option<f64>>, MotionError> {
    turn_angle_sequence_with_radius(lons, lats, distances, EARTH_RADIUS_METERS)
}

/// Like [`turn_angle_sequence`] for distances measured on a sphere of radius `radius_m`. The
/// side between the neighbours of each vertex is computed on the same sphere.
pub fn turn_angle_sequence_with_radius(lons: &[f64], lats: &[f64], distances: &[f64], radius_m: f64) -> Result<Vec<Option<f64>>, MotionError> {
    let n = lons.len();
    MotionError::check_len(n, lats.len())?;
    MotionError::check_len(n, distances.len())?;

    let mut angles = vec![None; n];
    // a is i-1, b is i and c is i+1
    for i in 1..n.saturating_sub(1) {
        let ab = distances[i];
        let bc = distances[i + 1];
        let ac = haversine_distance_with_radius(Point::new(lons[i - 1], lats[i - 1]), Point::new(lons[i + 1], lats[i + 1]), radius_m);
        angles[i] = Some(angle_from_sides(ab, bc, ac));
    }

    Ok(angles)
}

fn angle_from_sides(ab: f64, bc: f64, ac: f64) -> f64 {
    let cos = (ab * ab + bc * bc - ac * ac) / (2. * ab * bc);
    if cos.is_finite() {
        cos.clamp(-1., 1.).acos()
    } else {
        f64::NAN
    }
}

#[cfg(test)]
use std::f64::consts::{FRAC_PI_2, PI};

#[test]
fn straight_line_is_pi() {
    let angle = turn_angle(Point::new(0., 0.), Point::new(1., 0.), Point::new(2., 0.));
    assert!((angle - PI).abs() < 1e-6, "{angle}");

    let angle = turn_angle(Point::new(10., 55.), Point::new(10., 55.001), Point::new(10., 55.002));
    assert!((angle - PI).abs() < 1e-6, "{angle}");
}

#[test]
fn right_angle() {
    let a = Point::new(0., 0.001);
    let b = Point::new(0., 0.);
    let c = Point::new(0.001, 0.);
    let angle = turn_angle(a, b, c);
    assert!((angle - FRAC_PI_2).abs() < 1e-6, "{angle}");
}

#[test]
fn out_and_back_is_zero() {
    let a = Point::new(12.5, 41.9);
    let b = Point::new(12.51, 41.9);
    assert!(turn_angle(a, b, a).abs() < 1e-6);
}

#[test]
fn coincident_vertex_is_nan() {
    let a = Point::new(12.5, 41.9);
    let c = Point::new(12.51, 41.91);
    assert!(turn_angle(a, a, c).is_nan());
    assert!(turn_angle(a, c, c).is_nan());
}

#[test]
fn sequence_endpoints_are_missing() {
    let lons = [0., 0., 0.001, 0.002];
    let lats = [0.001, 0., 0., 0.];
    let distances = crate::haversine_distance_sequence(&lons, &lats, crate::EARTH_RADIUS_METERS).unwrap();
    let angles = turn_angle_sequence(&lons, &lats, &distances).unwrap();

    assert_eq!(angles.len(), 4);
    assert_eq!(angles[0], None);
    assert_eq!(angles[3], None);
    assert!((angles[1].unwrap() - FRAC_PI_2).abs() < 1e-6);
    assert!((angles[2].unwrap() - PI).abs() < 1e-6);
}

#[test]
fn sequence_uses_supplied_distances() {
    let lons = [0., 1., 2.];
    let lats = [0., 0., 0.];
    let fresh = turn_angle(Point::new(0., 0.), Point::new(1., 0.), Point::new(2., 0.));

    let distances = crate::haversine_distance_sequence(&lons, &lats, crate::EARTH_RADIUS_METERS).unwrap();
    assert_eq!(turn_angle_sequence(&lons, &lats, &distances).unwrap()[1], Some(fresh));

    // ab and bc come from the caller, ac is always recomputed
    let skewed = [0., distances[1] * 2., distances[2] * 2.];
    // ab = bc = ac makes an equilateral triangle
    let angle = turn_angle_sequence(&lons, &lats, &skewed).unwrap()[1].unwrap();
    assert!((angle - PI / 3.).abs() < 1e-6, "{angle}");
}

#[test]
fn sequence_short_tracks() {
    assert!(turn_angle_sequence(&[], &[], &[]).unwrap().is_empty());
    assert_eq!(turn_angle_sequence(&[1.], &[2.], &[0.]).unwrap(), vec![None]);
    assert_eq!(turn_angle_sequence(&[1., 1.1], &[2., 2.], &[0., 10.]).unwrap(), vec![None, None]);
}

#[test]
fn sequence_rejects_mismatched_lengths() {
    let err = turn_angle_sequence(&[1., 2., 3.], &[1., 2., 3.], &[0., 1.]).unwrap_err();
    assert_eq!(err, MotionError::LengthMismatch { expected: 3, found: 2 });
}

#[test]
fn sequence_angle_is_independent_of_radius() {
    let lons = [0., 0., 0.001];
    let lats = [0.001, 0., 0.];
    for radius in [EARTH_RADIUS_METERS, 6_371_000., 6_378.137] {
        let distances = crate::haversine_distance_sequence(&lons, &lats, radius).unwrap();
        let angle = turn_angle_sequence_with_radius(&lons, &lats, &distances, radius).unwrap()[1].unwrap();
        assert!((angle - FRAC_PI_2).abs() < 1e-6, "radius {radius}: {angle}");
    }
}
