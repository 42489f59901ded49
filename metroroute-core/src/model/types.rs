use geo::Point;

use crate::{Cost, Time};

/// Directed adjacency record owned by its origin station
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Target station name
    pub to: String,
    pub time: Time,
    /// Carried from the data source, not used by any criterion
    pub distance: f64,
    pub cost: Cost,
    /// Line this segment belongs to
    pub line: String,
}

/// Validated segment between two stations, as handed over by ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub from: String,
    pub to: String,
    pub time: Time,
    pub distance: f64,
    pub cost: Cost,
    pub line: String,
    /// x = longitude, y = latitude
    pub from_coord: Point<f64>,
    /// x = longitude, y = latitude
    pub to_coord: Point<f64>,
}

impl SegmentRecord {
    pub(crate) fn forward_edge(&self) -> Edge {
        Edge {
            to: self.to.clone(),
            time: self.time,
            distance: self.distance,
            cost: self.cost,
            line: self.line.clone(),
        }
    }

    pub(crate) fn reverse_edge(&self) -> Edge {
        Edge {
            to: self.from.clone(),
            time: self.time,
            distance: self.distance,
            cost: self.cost,
            line: self.line.clone(),
        }
    }
}
