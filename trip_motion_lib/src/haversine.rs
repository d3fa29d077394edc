use geo_types::Point;

use crate::MotionError;

/// Equatorial radius of the earth in meters (WGS 84).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Great-circle distance in meters between two points given as (longitude, latitude) degrees,
/// using [`EARTH_RADIUS_METERS`].
pub fn haversine_distance(a: Point, b: Point) -> f64 {
    haversine_distance_with_radius(a, b, EARTH_RADIUS_METERS)
}

/// Great-circle distance on a sphere of radius `radius_m`.
///
/// Coordinates are not range checked. The haversine term is clamped to [0, 1] so that rounding
/// at identical or antipodal points never pushes `asin` out of its domain; NaN input still
/// yields NaN.
pub fn haversine_distance_with_radius(a: Point, b: Point, radius_m: f64) -> f64 {
    let lat_a = a.y().to_radians();
    let lat_b = b.y().to_radians();
    let d_lat = lat_a - lat_b;
    let d_lon = a.x().to_radians() - b.x().to_radians();

    let h = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat_a) * f64::cos(lat_b) * f64::sin(d_lon / 2.).powi(2);

    2. * radius_m * f64::asin(f64::sqrt(h.clamp(0., 1.)))
}

/// Distances between consecutive points of a track.
///
/// The result has one entry per point. Entry 0 is 0 since the first point has no predecessor,
/// entry `i` is the distance from point `i - 1` to point `i`.
pub fn haversine_distance_sequence(lons: &[f64], lats: &[f64], radius_m: f64) -> Result<Vec<f64>, MotionError> {
    MotionError::check_len(lons.len(), lats.len())?;

    let mut distances = Vec::with_capacity(lons.len());
    if lons.is_empty() {
        return Ok(distances);
    }

    distances.push(0.);
    for i in 1..lons.len() {
        let prev = Point::new(lons[i - 1], lats[i - 1]);
        let curr = Point::new(lons[i], lats[i]);
        distances.push(haversine_distance_with_radius(prev, curr, radius_m));
    }

    Ok(distances)
}

#[cfg(test)]
fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!((actual - expected).abs() <= tolerance, "expected {expected} ± {tolerance}, got {actual}");
}

#[test]
fn self_distance_is_zero() {
    for (lon, lat) in [(0., 0.), (9.5, 55.1), (-73.98, 40.75), (179.9, -89.9)] {
        let p = Point::new(lon, lat);
        assert_eq!(haversine_distance(p, p), 0.);
    }
}

#[test]
fn distance_is_symmetric() {
    let aarhus = Point::new(10.2039, 56.1629);
    let yerevan = Point::new(44.5152, 40.1872);
    assert_eq!(haversine_distance(aarhus, yerevan), haversine_distance(yerevan, aarhus));
}

#[test]
fn one_degree_of_latitude() {
    let a = Point::new(0., 0.);
    let b = Point::new(0., 1.);
    // R * pi / 180
    assert_close(haversine_distance(a, b), 111_319.49, 1.);
    assert_close(haversine_distance_with_radius(a, b, 6_371_000.), 111_194.9, 1.);
}

#[test]
fn antipodal_points_are_half_a_circumference_apart() {
    let a = Point::new(0., 0.);
    let b = Point::new(180., 0.);
    let d = haversine_distance(a, b);
    assert!(!d.is_nan());
    assert_close(d, std::f64::consts::PI * EARTH_RADIUS_METERS, 1e-6);

    let north = Point::new(12., 90.);
    let south = Point::new(-168., -90.);
    assert_close(haversine_distance(north, south), std::f64::consts::PI * EARTH_RADIUS_METERS, 1e-6);
}

#[test]
fn nan_coordinates_propagate() {
    let d = haversine_distance(Point::new(f64::NAN, 0.), Point::new(1., 1.));
    assert!(d.is_nan());
}

#[test]
fn sequence_matches_pairwise_distances() {
    let lons = [9.0, 9.001, 9.003, 9.003, 8.99];
    let lats = [55.0, 55.0, 55.002, 55.002, 55.01];
    let distances = haversine_distance_sequence(&lons, &lats, EARTH_RADIUS_METERS).unwrap();

    assert_eq!(distances.len(), lons.len());
    assert_eq!(distances[0], 0.);
    for i in 1..lons.len() {
        let expected = haversine_distance(Point::new(lons[i - 1], lats[i - 1]), Point::new(lons[i], lats[i]));
        assert_eq!(distances[i], expected);
    }
    assert_eq!(distances[3], 0.);
}

#[test]
fn sequence_edge_lengths() {
    assert!(haversine_distance_sequence(&[], &[], EARTH_RADIUS_METERS).unwrap().is_empty());
    assert_eq!(haversine_distance_sequence(&[4.], &[52.], EARTH_RADIUS_METERS).unwrap(), vec![0.]);
}

#[test]
fn sequence_rejects_mismatched_lengths() {
    let err = haversine_distance_sequence(&[1., 2., 3.], &[1., 2.], EARTH_RADIUS_METERS).unwrap_err();
    assert_eq!(err, MotionError::LengthMismatch { expected: 3, found: 2 });
}
