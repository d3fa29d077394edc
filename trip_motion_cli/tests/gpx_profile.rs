use trip_motion_cli::{gpx_util::read_gpx_from, MotionConfig};
use trip_motion_lib::EARTH_RADIUS_METERS;

const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="trip_motion" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning walk</name>
    <trkseg>
      <trkpt lat="56.0" lon="10.0"><time>2024-05-01T08:00:00Z</time><hdop>1.0</hdop></trkpt>
      <trkpt lat="56.00001" lon="10.0"><time>2024-05-01T08:00:05Z</time><hdop>1.0</hdop></trkpt>
      <trkpt lat="56.001" lon="10.0"><time>2024-05-01T08:00:35Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="56.001" lon="10.0"><time>2024-05-01T08:10:00Z</time><hdop>2.0</hdop></trkpt>
      <trkpt lat="56.001" lon="10.001"><time>2024-05-01T08:10:30Z</time><hdop>2.0</hdop></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

#[test]
fn reads_points_segments_and_accuracy() {
    let session = read_gpx_from(TWO_SEGMENTS.as_bytes(), &MotionConfig::default()).unwrap();

    assert_eq!(session.title, "Morning walk");
    assert_eq!(session.track_points.len(), 5);
    assert_eq!(
        session.track_points.iter().map(|p| p.segment).collect::<Vec<_>>(),
        vec![0, 0, 0, 1, 1]
    );
    assert_eq!(
        session.track_points.iter().map(|p| p.accuracy).collect::<Vec<_>>(),
        vec![5., 5., 10., 10., 10.]
    );
    assert_eq!(session.track_points[1].longitude(), 10.0);
    assert_eq!(session.track_points[1].latitude(), 56.00001);
    assert_eq!(session.start_time, session.track_points[0].timestamp);
    assert_eq!(session.start_time.unwrap().to_rfc3339(), "2024-05-01T08:00:00+00:00");
}

#[test]
fn profile_does_not_carry_stillness_across_segments() {
    let session = read_gpx_from(TWO_SEGMENTS.as_bytes(), &MotionConfig::default()).unwrap();
    let profile = session.motion_profile(EARTH_RADIUS_METERS).unwrap();

    // point 3 repeats point 2 but starts a new segment
    assert_eq!(profile[3].distance, 0.);
    assert_eq!(profile.iter().map(|s| s.still).collect::<Vec<_>>(), vec![false, true, false, false, false]);

    assert_eq!(profile[0].turn_angle, None);
    assert_eq!(profile[4].turn_angle, None);
    assert!((profile[1].turn_angle.unwrap() - std::f64::consts::PI).abs() < 1e-3);
}

#[test]
fn hdop_scale_is_configurable() {
    let config = MotionConfig {
        hdop_scale: 100.,
        ..MotionConfig::default()
    };
    let session = read_gpx_from(TWO_SEGMENTS.as_bytes(), &config).unwrap();
    assert_eq!(session.track_points[3].accuracy, 200.);
    assert_eq!(session.still_count(EARTH_RADIUS_METERS).unwrap(), 2);
}

#[test]
fn rejects_malformed_gpx() {
    assert!(read_gpx_from("<gpx>".as_bytes(), &MotionConfig::default()).is_err());
}
