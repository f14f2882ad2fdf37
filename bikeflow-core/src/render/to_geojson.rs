use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::json;

use super::CircleElement;
use crate::{Error, Frame};

impl Frame {
    /// Converts the bound elements to a `GeoJSON` `FeatureCollection` of
    /// station points. The collection carries the filter and its label as
    /// foreign members.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .elements
            .iter()
            .map(create_station_feature)
            .collect::<Result<Vec<_>, _>>()?;

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("filter".to_string(), json!(self.filter.to_signal()));
        foreign_members.insert("label".to_string(), json!(self.label));
        foreign_members.insert(
            "max_total_traffic".to_string(),
            json!(self.snapshot.max_total_traffic()),
        );

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson()?)?)
    }
}

fn create_station_feature(element: &CircleElement) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&element.geometry));

    let value = json!({
        "type": "Feature",
        "id": element.key.as_str(),
        "geometry": geometry,
        "properties": {
            "short_name": element.key.as_str(),
            "element_id": element.id.get(),
            "arrivals": element.arrivals,
            "departures": element.departures,
            "total_traffic": element.total_traffic,
            "r": element.r,
            "flow_ratio": element.flow_ratio,
            "cx": element.cx,
            "cy": element.cy,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
