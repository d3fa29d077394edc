//! Range checks for callers that would rather reject bad fixes than let NaN flow through the
//! numeric functions.

use crate::MotionError;

pub fn validate_position(lon: f64, lat: f64) -> Result<(), MotionError> {
    position_error(lon, lat).map_or(Ok(()), |reason| Err(MotionError::invalid(None, reason)))
}

pub fn validate_accuracy(accuracy: f64) -> Result<(), MotionError> {
    accuracy_error(accuracy).map_or(Ok(()), |reason| Err(MotionError::invalid(None, reason)))
}

/// Checks a whole track, reporting the first bad point with its index.
pub fn validate_track(lons: &[f64], lats: &[f64], accuracy: &[f64]) -> Result<(), MotionError> {
    MotionError::check_len(lons.len(), lats.len())?;
    MotionError::check_len(lons.len(), accuracy.len())?;

    for (i, ((&lon, &lat), &acc)) in lons.iter().zip(lats).zip(accuracy).enumerate() {
        if let Some(reason) = position_error(lon, lat).or_else(|| accuracy_error(acc)) {
            return Err(MotionError::invalid(Some(i), reason));
        }
    }

    Ok(())
}

fn position_error(lon: f64, lat: f64) -> Option<String> {
    if !(-180. ..=180.).contains(&lon) {
        return Some(format!("longitude {lon} outside [-180, 180]"));
    }
    if !(-90. ..=90.).contains(&lat) {
        return Some(format!("latitude {lat} outside [-90, 90]"));
    }
    None
}

fn accuracy_error(accuracy: f64) -> Option<String> {
    if !(accuracy >= 0. && accuracy.is_finite()) {
        return Some(format!("accuracy {accuracy} must be a finite, non-negative radius"));
    }
    None
}

#[test]
fn accepts_bounds() {
    assert!(validate_position(-180., -90.).is_ok());
    assert!(validate_position(180., 90.).is_ok());
    assert!(validate_accuracy(0.).is_ok());
}

#[test]
fn rejects_out_of_range_and_nan() {
    assert!(validate_position(180.5, 0.).is_err());
    assert!(validate_position(0., -90.1).is_err());
    assert!(validate_position(f64::NAN, 0.).is_err());
    assert!(validate_accuracy(-1.).is_err());
    assert!(validate_accuracy(f64::NAN).is_err());
    assert!(validate_accuracy(f64::INFINITY).is_err());
}

#[test]
fn track_reports_first_bad_index() {
    let err = validate_track(&[1., 2., 3.], &[1., 95., 1.], &[1., 1., -1.]).unwrap_err();
    assert_eq!(err, MotionError::invalid(Some(1), "latitude 95 outside [-90, 90]"));

    let err = validate_track(&[1., 2.], &[1., 2.], &[1.]).unwrap_err();
    assert_eq!(err, MotionError::LengthMismatch { expected: 2, found: 1 });

    assert!(validate_track(&[], &[], &[]).is_ok());
}
