use std::path::PathBuf;

use bikeflow_core::loading::DatasetConfig;
use clap::{Args, Parser, Subcommand};

/// Bike-share station traffic by time of day
#[derive(Debug, Parser)]
#[command(name = "bikeflow", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print per-station arrivals, departures and radius
    Stats {
        #[command(flatten)]
        datasets: DatasetArgs,
        /// Minute of day (0-1439); -1 or anything else means any time
        #[arg(short, long, default_value = "-1", allow_hyphen_values = true)]
        minute: String,
        /// Only print the busiest stations
        #[arg(long)]
        top: Option<usize>,
    },
    /// Write the overlay as a GeoJSON FeatureCollection
    Export {
        #[command(flatten)]
        datasets: DatasetArgs,
        /// Minute of day (0-1439); -1 or anything else means any time
        #[arg(short, long, default_value = "-1", allow_hyphen_values = true)]
        minute: String,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// Station list (CSV, JSON array or GBFS station_information)
    #[arg(long)]
    pub stations: PathBuf,
    /// Trip log (CSV)
    #[arg(long)]
    pub trips: PathBuf,
    /// Map zoom used for screen positions
    #[arg(long, default_value_t = 12.0)]
    pub zoom: f64,
    #[arg(long, default_value_t = 960.0)]
    pub width: f64,
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
}

impl DatasetArgs {
    pub fn to_config(&self) -> DatasetConfig {
        DatasetConfig::new(&self.stations, &self.trips)
    }
}
