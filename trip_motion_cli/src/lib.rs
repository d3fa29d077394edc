pub mod config;
pub mod gpx_util;
pub mod report;

pub use config::{default_log_filter, MotionConfig};
