// Re-export key components
pub use crate::export::{line_color, path_coordinates, to_geojson, to_geojson_string, to_map_json};
pub use crate::loading::{LoadReport, NetworkConfig, create_metro_network, parse_segments};
pub use crate::model::{Edge, MetroNetwork, SegmentRecord};
pub use crate::routing::{
    Criterion, Direction, Path, RouteError, Stop, TripSummary, count_line_changes,
    find_least_stops, find_path_by_cost, find_path_by_time, find_route, find_routes_one_to_many,
    try_find_route,
};

// Core scalar types
pub use crate::Cost;
pub use crate::Time;
pub use crate::Weight;
