//! Hand-off of computed paths to external map renderers.
//!
//! Coordinates are never consulted by the route engine; they are only
//! attached here, after a path has been found.

mod to_geojson;

use geo::Point;
use log::warn;
use serde::Serialize;

use crate::{Error, MetroNetwork, Path};

pub use to_geojson::{to_geojson, to_geojson_string};

/// Stations of `path` with their coordinates, in path order.
///
/// Stations without a stored coordinate are left out.
pub fn path_coordinates(network: &MetroNetwork, path: &Path) -> Vec<(String, Point<f64>)> {
    path.stops()
        .iter()
        .filter_map(|stop| match network.station_coordinate(&stop.station) {
            Some(point) => Some((stop.station.clone(), point)),
            None => {
                warn!("Coordinate not found for station: {}", stop.station);
                None
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct MapStation<'a> {
    name: &'a str,
    lat: f64,
    lng: f64,
}

/// Compact JSON array of `{"name", "lat", "lng"}` objects for the map renderer
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn to_map_json(network: &MetroNetwork, path: &Path) -> Result<String, Error> {
    let stations = path_coordinates(network, path);
    let payload: Vec<MapStation<'_>> = stations
        .iter()
        .map(|(name, point)| MapStation {
            name: name.as_str(),
            lat: point.y(),
            lng: point.x(),
        })
        .collect();

    Ok(serde_json::to_string(&payload)?)
}

/// Display color for a line name, matched by keyword
pub fn line_color(line: &str) -> &'static str {
    const PALETTE: [(&[&str], &str); 11] = [
        (&["blue"], "blue"),
        (&["red"], "red"),
        (&["green"], "green"),
        (&["yellow"], "darkgoldenrod"),
        (&["pink"], "deeppink"),
        (&["magenta"], "magenta"),
        (&["orange"], "orange"),
        (&["aqua"], "darkcyan"),
        (&["violet", "voilet"], "darkviolet"),
        (&["gray", "grey"], "gray"),
        (&["rapid"], "saddlebrown"),
    ];

    let line = line.to_lowercase();
    PALETTE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| line.contains(*keyword)))
        .map_or("black", |(_, color)| *color)
}
