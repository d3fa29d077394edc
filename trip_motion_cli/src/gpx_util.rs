use std::{io::Read, path::Path, str::FromStr};

use anyhow::Context;
use chrono::{DateTime, Utc};
use trip_motion_lib::{track_point::TrackPoint, track_session::TrackSession};

use crate::MotionConfig;

pub fn read_gpx(path: &Path, config: &MotionConfig) -> anyhow::Result<TrackSession> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    read_gpx_from(reader, config).with_context(|| format!("Failed to read GPX from {}", path.display()))
}

/// Every track point becomes a [`TrackPoint`]. Segments are numbered across all tracks so that
/// stillness is never carried over a gap in the recording.
pub fn read_gpx_from<R: Read>(reader: R, config: &MotionConfig) -> anyhow::Result<TrackSession> {
    let gpx = gpx::read(reader)?;

    let mut start_time = None;
    let mut title = None;
    if let Some(meta) = gpx.metadata {
        title = meta.name;
        if let Some(t) = meta.time {
            start_time = Some(parse_time(t)?);
        }
    }

    let mut track_points: Vec<TrackPoint> = Vec::new();
    let mut segment_index = 0;
    for track in gpx.tracks {
        if title.is_none() {
            title = track.name;
        }

        for segment in track.segments {
            for point in segment.points {
                let position = point.point();
                let accuracy = config.accuracy_from_hdop(point.hdop);
                let timestamp = point.time.map(parse_time).transpose()?;
                track_points.push(TrackPoint::new(position, accuracy, segment_index, timestamp));
            }
            segment_index += 1;
        }
    }

    if start_time.is_none() {
        start_time = track_points.iter().find_map(|p| p.timestamp);
    }

    tracing::info!("Read {} points in {} segments", track_points.len(), segment_index);

    Ok(TrackSession::new(title.unwrap_or_else(|| "Unnamed".to_string()), start_time, track_points))
}

fn parse_time(time: gpx::Time) -> anyhow::Result<DateTime<Utc>> {
    let formatted = time.format()?;
    DateTime::from_str(&formatted).with_context(|| format!("Invalid timestamp {formatted}"))
}

#[test]
fn missing_file_is_an_error() {
    let err = read_gpx(Path::new("does/not/exist.gpx"), &MotionConfig::default()).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.gpx"));
}
