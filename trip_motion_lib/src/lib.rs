pub mod error;
pub mod haversine;
pub mod stillness;
pub mod turn_angle;
pub mod validate;

pub mod track_point;
pub mod track_session;

pub use error::MotionError;
pub use haversine::{haversine_distance, haversine_distance_sequence, haversine_distance_with_radius, EARTH_RADIUS_METERS};
pub use stillness::{stillness_flags, stillness_flags_with_radius};
pub use turn_angle::{turn_angle, turn_angle_sequence, turn_angle_sequence_with_radius};
