use chrono::{DateTime, Utc};
use geo_types::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single GPS fix. `position` is (longitude, latitude) in degrees, `accuracy` is the horizontal
/// uncertainty radius in meters and `segment` groups fixes recorded without interruption.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub position: Point,
    pub accuracy: f64,
    pub segment: u32,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(position: Point, accuracy: f64, segment: u32, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            position,
            accuracy,
            segment,
            timestamp,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }
}

#[cfg(feature = "serde")]
#[test]
fn serializes_position_as_coordinates() {
    let point = TrackPoint::new(Point::new(9.5, 55.25), 4., 2, None);
    let json = serde_json::to_value(point).unwrap();
    assert_eq!(json["position"]["x"], 9.5);
    assert_eq!(json["position"]["y"], 55.25);
    assert_eq!(json["segment"], 2);

    let back: TrackPoint = serde_json::from_value(json).unwrap();
    assert_eq!(back, point);
}
