//! This module is responsible for loading the station and trip datasets
//! and building the in-memory registry and trip log.

mod builder;
mod config;
pub mod dataset;

pub use builder::{load_datasets, load_stations, load_trips};
pub use config::DatasetConfig;
