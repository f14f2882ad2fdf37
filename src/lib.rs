//! Command-line front end: per-station traffic tables and `GeoJSON` export
//! of the overlay for a given minute of day.

pub mod cli;
pub mod export;
pub mod stats;

use bikeflow_core::prelude::*;
use geo::{Centroid, MultiPoint};

pub use cli::{Cli, Command, DatasetArgs};

/// Loads the datasets and builds a controller already set to `filter`.
///
/// The view is centered on the centroid of the stations.
///
/// # Errors
///
/// Returns an error if either dataset fails to load.
pub fn open_session(
    datasets: &DatasetArgs,
    filter: TimeFilter,
) -> Result<ReactiveController<WebMercatorView>, Error> {
    let (registry, trips) = load_datasets(&datasets.to_config())?;

    let stations: MultiPoint = registry.iter().map(|s| s.geometry).collect();
    let center = stations.centroid().unwrap_or_else(|| geo::Point::new(0.0, 0.0));
    let view = WebMercatorView::new(center, datasets.zoom, datasets.width, datasets.height);

    let mut controller = ReactiveController::new(registry, trips, view);
    if filter.is_active() {
        controller.set_filter(filter);
    }
    Ok(controller)
}

/// Runs one command to completion.
///
/// # Errors
///
/// Returns an error if loading fails or the output cannot be written.
pub fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Command::Stats {
            datasets,
            minute,
            top,
        } => {
            let controller = open_session(datasets, TimeFilter::parse_signal(minute))?;
            print!("{}", stats::render_table(&controller.frame(), *top));
            Ok(())
        }
        Command::Export {
            datasets,
            minute,
            output,
        } => {
            let controller = open_session(datasets, TimeFilter::parse_signal(minute))?;
            export::write_geojson(&controller.frame(), output.as_deref())
        }
    }
}
