use std::io::Write;

use trip_motion_lib::track_session::MotionSample;

/// Tab separated, one row per point. Turn angles are printed in degrees, `NA` at the ends of the
/// track and `NaN` at a point that repeats a neighbouring fix.
pub fn write_table<W: Write>(out: &mut W, samples: &[MotionSample]) -> std::io::Result<()> {
    writeln!(out, "index\tlon\tlat\tdistance_m\tturn_deg\tstill")?;
    for s in samples {
        let angle = match s.turn_angle {
            Some(angle) if angle.is_nan() => "NaN".to_string(),
            Some(angle) => format!("{:.1}", angle.to_degrees()),
            None => "NA".to_string(),
        };
        writeln!(out, "{}\t{:.6}\t{:.6}\t{:.2}\t{}\t{}", s.index, s.longitude, s.latitude, s.distance, angle, s.still)?;
    }
    Ok(())
}

/// JSON has no NaN, so an undefined angle is written as `null` just like the missing angles at
/// the ends of the track. Use the table output to tell them apart.
pub fn write_json<W: Write>(out: &mut W, samples: &[MotionSample]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, samples)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, title: &str, points: usize, total_distance: f64, still: usize) -> std::io::Result<()> {
    writeln!(out, "# {title}: {points} points, {total_distance:.1} m, {still} still")
}

#[cfg(test)]
fn sample(index: usize, turn_angle: Option<f64>, still: bool) -> MotionSample {
    MotionSample {
        index,
        longitude: 9.,
        latitude: 55.5,
        distance: 12.5,
        turn_angle,
        still,
    }
}

#[test]
fn table_marks_missing_angles() {
    let samples = [
        sample(0, None, false),
        sample(1, Some(std::f64::consts::FRAC_PI_2), true),
        sample(2, Some(f64::NAN), false),
    ];
    let mut out = Vec::new();
    write_table(&mut out, &samples).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "0\t9.000000\t55.500000\t12.50\tNA\tfalse");
    assert_eq!(lines[2], "1\t9.000000\t55.500000\t12.50\t90.0\ttrue");
    assert_eq!(lines[3], "2\t9.000000\t55.500000\t12.50\tNaN\tfalse");
}

#[test]
fn json_writes_missing_angle_as_null() {
    let mut out = Vec::new();
    write_json(&mut out, &[sample(0, None, false)]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(value[0]["turn_angle"].is_null());

    let mut out = Vec::new();
    write_json(&mut out, &[sample(1, Some(f64::NAN), false)]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(value[0]["turn_angle"].is_null());
    assert_eq!(value[0]["still"], false);
}
