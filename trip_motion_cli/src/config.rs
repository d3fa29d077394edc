use clap::Args;
use trip_motion_lib::EARTH_RADIUS_METERS;

/// Settings shared by all commands.
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Radius of the spherical earth in meters
    #[arg(long, global = true, env = "MOTION_EARTH_RADIUS", default_value_t = EARTH_RADIUS_METERS)]
    pub earth_radius: f64,

    /// Meters of horizontal accuracy per unit of HDOP
    #[arg(long, global = true, env = "MOTION_HDOP_SCALE", default_value_t = 5.0)]
    pub hdop_scale: f64,

    /// Accuracy in meters for fixes without HDOP
    #[arg(long, global = true, env = "MOTION_DEFAULT_ACCURACY", default_value_t = 10.0)]
    pub default_accuracy: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS_METERS,
            hdop_scale: 5.0,
            default_accuracy: 10.0,
        }
    }
}

impl MotionConfig {
    pub fn accuracy_from_hdop(&self, hdop: Option<f64>) -> f64 {
        hdop.map_or(self.default_accuracy, |hdop| hdop * self.hdop_scale)
    }
}

/// Log filter used when `RUST_LOG` is unset. Events of the binary itself are logged under
/// `bin_crate`, those of this library under its own crate name.
pub fn default_log_filter(bin_crate: &str) -> String {
    format!("{bin_crate}=info,{}=info,trip_motion_lib=info", env!("CARGO_CRATE_NAME"))
}

#[test]
fn default_filter_covers_library_modules() {
    let filter = default_log_filter("motion");
    assert_eq!(filter, "motion=info,trip_motion_cli=info,trip_motion_lib=info");
    assert!(tracing_subscriber::EnvFilter::try_new(&filter).is_ok());
}

#[test]
fn accuracy_falls_back_without_hdop() {
    let config = MotionConfig::default();
    assert_eq!(config.accuracy_from_hdop(Some(1.5)), 7.5);
    assert_eq!(config.accuracy_from_hdop(None), 10.0);
}
