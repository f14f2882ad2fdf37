//! Raw station and trip records and their conversion into the model

mod de;
mod parser;
mod processor;
mod raw_types;

pub use de::parse_timestamp;
pub use parser::{
    Parsed, StationFormat, deserialize_csv_file, deserialize_csv_reader,
    deserialize_station_json, deserialize_station_json_file,
};
pub use processor::{stations_from_feed, trips_from_feed};
pub use raw_types::{FeedStation, FeedTrip};
