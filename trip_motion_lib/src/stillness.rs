use geo_types::Point;

use crate::{haversine_distance_with_radius, MotionError, EARTH_RADIUS_METERS};
#[cfg(test)]
use crate::haversine_distance;

/// Flags the points of a track where the subject is standing still.
///
/// Each point is compared to an anchor, starting at the first point. A point is still when it
/// lies closer to the anchor than the sum of the two accuracy radii. Otherwise it becomes the
/// new anchor, and so does any point whose group key differs from the anchor's. The first point
/// is never still.
///
/// All slices are aligned with `lons`.
pub fn stillness_flags<K: PartialEq>(accuracy: &[f64], lons: &[f64], lats: &[f64], group_key: &[K]) -> Result<Vec<bool>, MotionError> {
    stillness_flags_with_radius(accuracy, lons, lats, group_key, EARTH_RADIUS_METERS)
}

/// Like [`stillness_flags`], measuring distances to the anchor on a sphere of radius `radius_m`.
pub fn stillness_flags_with_radius<K: PartialEq>(
    accuracy: &[f64],
    lons: &[f64],
    lats: &[f64],
    group_key: &[K],
    radius_m: f64,
) -> Result<Vec<bool>, MotionError> {
    let n = lons.len();
    MotionError::check_len(n, lats.len())?;
    MotionError::check_len(n, accuracy.len())?;
    MotionError::check_len(n, group_key.len())?;

    let mut still = vec![false; n];
    let mut anchor = 0;

    for i in 1..n {
        if group_key[i] != group_key[anchor] {
            tracing::trace!(index = i, "group changed, new anchor");
            anchor = i;
            continue;
        }

        let dist = haversine_distance_with_radius(Point::new(lons[i], lats[i]), Point::new(lons[anchor], lats[anchor]), radius_m);
        if dist < accuracy[i] + accuracy[anchor] {
            still[i] = true;
        } else {
            anchor = i;
        }
    }

    Ok(still)
}

#[test]
fn identical_points_are_still() {
    let still = stillness_flags(&[5., 5., 5.], &[9., 9., 9.], &[55., 55., 55.], &[1, 1, 1]).unwrap();
    assert_eq!(still, vec![false, true, true]);
}

#[test]
fn moving_away_advances_anchor() {
    let lons = [10., 10., 10.0001, 10.];
    let lats = [56., 56.00002, 56.0001, 56.0001];
    let accuracy = [4., 4., 4., 4.];
    let still = stillness_flags(&accuracy, &lons, &lats, &[0; 4]).unwrap();

    // 2 m from the anchor, then 13 m away so index 2 becomes the anchor,
    // then 6 m from index 2 which is within the combined 8 m
    assert_eq!(still, vec![false, true, false, true]);
}

#[test]
fn anchor_is_fixed_while_still() {
    // Each point is 3 m from its predecessor but drifts away from the first point
    let lats = [0., 0.000027, 0.000054, 0.000081];
    let lons = [0.; 4];
    let accuracy = [2.5; 4];
    let still = stillness_flags(&accuracy, &lons, &lats, &["a"; 4]).unwrap();

    // 3 m, 6 m, then index 3 is 3 m from the new anchor at index 2
    assert_eq!(still, vec![false, true, false, true]);
}

#[test]
fn group_change_resets_anchor() {
    let lons = [3., 3., 3., 3.];
    let lats = [50., 50., 50., 50.];
    let accuracy = [10.; 4];
    let still = stillness_flags(&accuracy, &lons, &lats, &[1, 1, 2, 2]).unwrap();
    assert_eq!(still, vec![false, true, false, true]);
}

#[test]
fn zero_accuracy_never_still() {
    let still = stillness_flags(&[0.; 3], &[1.; 3], &[1.; 3], &[(); 3]).unwrap();
    assert_eq!(still, vec![false; 3]);
}

#[test]
fn nan_accuracy_moves_anchor() {
    let still = stillness_flags(&[5., f64::NAN, 5., 5.], &[1.; 4], &[1.; 4], &[0; 4]).unwrap();
    assert_eq!(still, vec![false, false, false, true]);
}

#[test]
fn empty_and_single_tracks() {
    assert!(stillness_flags::<u8>(&[], &[], &[], &[]).unwrap().is_empty());
    assert_eq!(stillness_flags(&[1.], &[1.], &[1.], &[1]).unwrap(), vec![false]);
}

#[test]
fn rejects_mismatched_lengths() {
    let err = stillness_flags(&[1., 1.], &[1., 1., 1.], &[1., 1., 1.], &[0, 0, 0]).unwrap_err();
    assert_eq!(err, MotionError::LengthMismatch { expected: 3, found: 2 });

    let err = stillness_flags(&[1., 1., 1.], &[1., 1., 1.], &[1., 1., 1.], &[0]).unwrap_err();
    assert_eq!(err, MotionError::LengthMismatch { expected: 3, found: 1 });
}

/// Older versions compared points with latitude and longitude swapped. Away from the equator
/// that measures the wrong distance, so the result can differ from the (lon, lat) comparison.
#[test]
fn swapped_coordinates_differ() {
    let a = Point::new(10., 60.);
    let b = Point::new(10.001, 60.);
    let correct = haversine_distance(a, b);
    let swapped = haversine_distance(Point::new(a.y(), a.x()), Point::new(b.y(), b.x()));
    assert!((correct - 55.7).abs() < 0.5, "{correct}");
    assert!((swapped - 111.3).abs() < 0.5, "{swapped}");

    // 60 m combined accuracy: still with the correct order, moving with the swapped one
    let still = stillness_flags(&[30., 30.], &[a.x(), b.x()], &[a.y(), b.y()], &[0, 0]).unwrap();
    assert_eq!(still, vec![false, true]);
}

#[test]
fn threshold_follows_radius() {
    // 0.001 degrees is 111 m on the earth but 0.11 m on a sphere of 6378 m
    let lons = [0., 0.];
    let lats = [0., 0.001];
    assert_eq!(stillness_flags(&[1., 1.], &lons, &lats, &[0, 0]).unwrap(), vec![false, false]);
    assert_eq!(stillness_flags_with_radius(&[1., 1.], &lons, &lats, &[0, 0], 6_378.137).unwrap(), vec![false, true]);
}
