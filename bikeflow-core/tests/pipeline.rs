use std::fs;
use std::path::PathBuf;

use bikeflow_core::prelude::*;
use geo::Point;

const STATIONS_CSV: &str = "\
short_name,name,lat,lon
A,Alpha,41.90,-87.63
B,Bravo,41.91,-87.64
C,Charlie,41.92,-87.65
";

const TRIPS_CSV: &str = "\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id
1,classic_bike,2023-05-01 08:00:00,2023-05-01 08:10:00,A,B
2,classic_bike,2023-05-01 08:05:00,2023-05-01 08:20:00,B,A
3,electric_bike,2023-05-02 17:30:00,2023-05-02 17:55:00,C,A
4,electric_bike,2023-05-02 17:35:00,2023-05-02 17:50:00,C,ZZ
5,electric_bike,garbage,2023-05-02 17:50:00,C,A
";

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "bikeflow-pipeline-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn test_load_and_recompute() {
    let fixture = Fixture::new("recompute");
    let config = DatasetConfig::new(
        fixture.write("stations.csv", STATIONS_CSV),
        fixture.write("trips.csv", TRIPS_CSV),
    );
    let (registry, trips) = load_datasets(&config).unwrap();

    assert_eq!(registry.len(), 3);
    // the row with a malformed timestamp is skipped
    assert_eq!(trips.len(), 4);

    let view = WebMercatorView::new(Point::new(-87.64, 41.91), 13.0, 800.0, 600.0);
    let mut controller = ReactiveController::new(registry, trips, view);

    let snapshot = controller.snapshot();
    let c = snapshot.get("C").unwrap();
    assert_eq!((c.departures, c.arrivals, c.total_traffic), (2, 0, 2));
    let a = snapshot.get("A").unwrap();
    assert_eq!((a.departures, a.arrivals, a.total_traffic), (1, 2, 3));
    assert_eq!(snapshot.max_total_traffic(), 3);
    for traffic in snapshot.iter() {
        assert_eq!(traffic.total_traffic, traffic.arrivals + traffic.departures);
    }

    controller.set_filter(TimeFilter::parse_signal("1050"));
    assert_eq!(controller.label(), "05:30 PM");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.trips_considered(), 2);
    assert_eq!(snapshot.get("B").unwrap().total_traffic, 0);
    assert_eq!(snapshot.get("C").unwrap().departures, 2);

    let c_element = controller
        .elements()
        .iter()
        .find(|e| e.key.as_str() == "C")
        .unwrap();
    assert!((c_element.r - 50.0).abs() < 1e-9);
    assert!((c_element.flow_ratio - 1.0).abs() < f64::EPSILON);

    let b_element = controller
        .elements()
        .iter()
        .find(|e| e.key.as_str() == "B")
        .unwrap();
    assert!((b_element.r - 3.0).abs() < 1e-9);
    assert!((b_element.flow_ratio - 0.5).abs() < f64::EPSILON);

    let geojson = controller.frame().to_geojson_string().unwrap();
    assert!(geojson.contains("\"label\":\"05:30 PM\""));
}

#[test]
fn test_station_json_registry() {
    let fixture = Fixture::new("json");
    let stations = fixture.write(
        "station_information.json",
        r#"{"data": {"stations": [
            {"short_name": "A", "lon": -87.63, "lat": 41.90},
            {"short_name": "B", "lon": -87.64, "lat": 41.91}
        ]}}"#,
    );

    let registry = load_stations(&stations).unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_missing_dataset_is_fatal() {
    let fixture = Fixture::new("missing");
    let config = DatasetConfig::new(
        fixture.write("stations.csv", STATIONS_CSV),
        fixture.dir.join("does-not-exist.csv"),
    );

    assert!(matches!(load_datasets(&config), Err(Error::IoError(_))));
}

#[test]
fn test_station_file_without_usable_rows_is_fatal() {
    let fixture = Fixture::new("empty");
    let stations = fixture.write("stations.csv", "short_name,lon,lat\n,1.0,2.0\nX,abc,2.0\n");

    assert!(matches!(load_stations(&stations), Err(Error::EmptyDataset(_))));
}
