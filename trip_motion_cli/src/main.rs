use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use geo_types::Point;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_motion_cli::{default_log_filter, gpx_util, report, MotionConfig};
use trip_motion_lib::{haversine_distance_with_radius, turn_angle};

#[derive(Parser)]
#[command(name = "motion")]
#[command(about = "Distances, turn angles and standstill detection for GPS tracks", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: MotionConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance in meters between two points
    #[command(allow_negative_numbers = true)]
    Distance { lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64 },
    /// Angle in degrees at B of the path A -> B -> C
    #[command(allow_negative_numbers = true)]
    Angle {
        lon_a: f64,
        lat_a: f64,
        lon_b: f64,
        lat_b: f64,
        lon_c: f64,
        lat_c: f64,
    },
    /// Per point distance, turn angle and stillness of a GPX track
    Profile {
        gpx_file: PathBuf,
        /// Print the profile as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Reject tracks with out of range coordinates or accuracy
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    tracing::debug!("Using {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Distance { lon_a, lat_a, lon_b, lat_b } => {
            let dist = haversine_distance_with_radius(Point::new(lon_a, lat_a), Point::new(lon_b, lat_b), config.earth_radius);
            writeln!(out, "{dist:.3}")?;
        }
        Commands::Angle { lon_a, lat_a, lon_b, lat_b, lon_c, lat_c } => {
            let angle = turn_angle(Point::new(lon_a, lat_a), Point::new(lon_b, lat_b), Point::new(lon_c, lat_c));
            if angle.is_nan() {
                tracing::warn!("B coincides with A or C, the angle is undefined");
            }
            writeln!(out, "{:.3}", angle.to_degrees())?;
        }
        Commands::Profile { gpx_file, json, strict } => {
            let session = gpx_util::read_gpx(&gpx_file, &config)?;
            if strict {
                session.validate()?;
            }

            let samples = session.motion_profile(config.earth_radius)?;
            if json {
                report::write_json(&mut out, &samples)?;
            } else {
                report::write_table(&mut out, &samples)?;
                let total = session.total_distance(config.earth_radius)?;
                let still = samples.iter().filter(|s| s.still).count();
                report::write_summary(&mut out, &session.title, samples.len(), total, still)?;
            }
        }
    }

    Ok(())
}
