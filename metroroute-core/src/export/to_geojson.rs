use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection};
use serde_json::{Value as JsonValue, json};

use super::line_color;
use crate::{Error, MetroNetwork, Path, Stop};

/// Converts a path to a `GeoJSON` `FeatureCollection`.
///
/// Every station with a known coordinate becomes a Point feature, every
/// segment whose two ends are known becomes a LineString feature carrying
/// the line, time, cost and display color.
///
/// # Errors
///
/// Returns an error if a feature cannot be built
pub fn to_geojson(network: &MetroNetwork, path: &Path) -> Result<FeatureCollection, Error> {
    let stops = path.stops();
    let coords: Vec<Option<Point<f64>>> = stops
        .iter()
        .map(|stop| network.station_coordinate(&stop.station))
        .collect();

    let mut features = Vec::with_capacity(stops.len() * 2);

    for (idx, stop) in stops.iter().enumerate() {
        let Some(point) = coords[idx] else {
            log::warn!("Coordinate not found for station: {}", stop.station);
            continue;
        };
        features.push(station_feature(stop, point, idx, stops.len())?);
    }

    for (idx, window) in coords.windows(2).enumerate() {
        if let [Some(from), Some(to)] = window {
            features.push(segment_feature(&stops[idx + 1], *from, *to, idx)?);
        }
    }

    let bbox = coords
        .iter()
        .flatten()
        .copied()
        .collect::<MultiPoint<f64>>()
        .bounding_rect()
        .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

    Ok(FeatureCollection {
        features,
        bbox,
        foreign_members: None,
    })
}

/// Serialized form of [`to_geojson`]
///
/// # Errors
///
/// Returns an error if a feature cannot be built or serialized
pub fn to_geojson_string(network: &MetroNetwork, path: &Path) -> Result<String, Error> {
    serde_json::to_string(&to_geojson(network, path)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn station_feature(stop: &Stop, point: Point<f64>, idx: usize, total: usize) -> Result<Feature, Error> {
    let role = if idx == 0 {
        "start"
    } else if idx + 1 == total {
        "end"
    } else {
        "stop"
    };

    feature_from_json(json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [point.x(), point.y()],
        },
        "properties": {
            "name": stop.station,
            "index": idx,
            "role": role,
        }
    }))
}

fn segment_feature(
    stop: &Stop,
    from: Point<f64>,
    to: Point<f64>,
    idx: usize,
) -> Result<Feature, Error> {
    feature_from_json(json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [[from.x(), from.y()], [to.x(), to.y()]],
        },
        "properties": {
            "segment": idx,
            "to_name": stop.station,
            "line": stop.line,
            "color": line_color(&stop.line),
            "time": stop.time,
            "cost": stop.cost,
        }
    }))
}

fn feature_from_json(value: JsonValue) -> Result<Feature, Error> {
    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentRecord;

    fn segment(from: &str, to: &str, from_coord: (f64, f64), to_coord: (f64, f64)) -> SegmentRecord {
        SegmentRecord {
            from: from.to_string(),
            to: to.to_string(),
            time: 3,
            distance: 1.0,
            cost: 15,
            line: "Blue Line".to_string(),
            from_coord: Point::new(from_coord.0, from_coord.1),
            to_coord: Point::new(to_coord.0, to_coord.1),
        }
    }

    #[test]
    fn builds_points_segments_and_bbox() {
        let network = MetroNetwork::build(vec![
            segment("A", "B", (77.0, 28.0), (77.2, 28.1)),
            segment("B", "C", (77.2, 28.1), (77.1, 28.3)),
        ])
        .unwrap();
        let path = Path::new(vec![
            Stop::origin("A"),
            Stop::new("B", "Blue Line", 3, 15),
            Stop::new("C", "Blue Line", 3, 15),
        ]);

        let collection = to_geojson(&network, &path).unwrap();
        assert_eq!(collection.features.len(), 5);
        assert_eq!(collection.bbox, Some(vec![77.0, 28.0, 77.2, 28.3]));

        let json: JsonValue = serde_json::from_str(&to_geojson_string(&network, &path).unwrap()).unwrap();
        assert_eq!(json["features"][0]["properties"]["role"], "start");
        assert_eq!(json["features"][2]["properties"]["role"], "end");
        assert_eq!(json["features"][3]["geometry"]["type"], "LineString");
        assert_eq!(json["features"][3]["properties"]["color"], "blue");
    }

    #[test]
    fn empty_path_has_no_features() {
        let network =
            MetroNetwork::build(vec![segment("A", "B", (77.0, 28.0), (77.2, 28.1))]).unwrap();

        let collection = to_geojson(&network, &Path::default()).unwrap();
        assert!(collection.features.is_empty());
        assert!(collection.bbox.is_none());
    }
}
