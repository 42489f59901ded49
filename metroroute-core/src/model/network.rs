//! Station-keyed adjacency graph of the metro network

use geo::Point;
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{debug, info};

use super::types::{Edge, SegmentRecord};
use crate::Error;

/// Main network structure.
///
/// Every source segment is stored twice, once per direction, so the graph
/// is undirected for routing even though adjacency is directed.
#[derive(Debug, Clone, Default)]
pub struct MetroNetwork {
    /// Outgoing edges of each station, in record order
    adjacency: HashMap<String, Vec<Edge>>,
    /// All known station names
    stations: HashSet<String>,
    /// First-seen coordinate of each station
    coordinates: HashMap<String, Point<f64>>,
    /// Number of accepted source segments
    segments: usize,
}

impl MetroNetwork {
    /// Builds a network from validated segment records
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if `records` is empty
    pub fn build<I>(records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = SegmentRecord>,
    {
        let mut network = Self::default();
        network.load(records)?;
        Ok(network)
    }

    /// Clears any prior state and loads `records` into the network
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if `records` is empty. The network
    /// is left empty in that case.
    pub fn load<I>(&mut self, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = SegmentRecord>,
    {
        self.adjacency.clear();
        self.stations.clear();
        self.coordinates.clear();
        self.segments = 0;

        for record in records {
            self.insert_segment(record);
        }

        if self.segments == 0 {
            return Err(Error::DataUnavailable(
                "no segment records were provided".to_string(),
            ));
        }

        info!(
            "Metro network loaded: {} stations, {} segments, {} coordinates",
            self.stations.len(),
            self.segments,
            self.coordinates.len()
        );
        Ok(())
    }

    fn insert_segment(&mut self, record: SegmentRecord) {
        debug!(
            "Adding segment {} <-> {} on {}",
            record.from, record.to, record.line
        );

        self.coordinates
            .entry(record.from.clone())
            .or_insert(record.from_coord);
        self.coordinates
            .entry(record.to.clone())
            .or_insert(record.to_coord);

        self.adjacency
            .entry(record.from.clone())
            .or_default()
            .push(record.forward_edge());
        self.adjacency
            .entry(record.to.clone())
            .or_default()
            .push(record.reverse_edge());

        self.stations.insert(record.from);
        self.stations.insert(record.to);
        self.segments += 1;
    }

    /// Distinct station names in lexicographic order
    pub fn station_names(&self) -> Vec<String> {
        self.stations.iter().sorted().cloned().collect()
    }

    /// Distinct line names in lexicographic order
    pub fn lines(&self) -> Vec<String> {
        self.adjacency
            .values()
            .flatten()
            .map(|edge| edge.line.as_str())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// check if such station can be used as a query endpoint
    pub fn has_station(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Edge from `from` whose target is `to`
    pub fn find_edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges_from(from).iter().find(|edge| edge.to == to)
    }

    /// Outgoing edges of a station, empty for unknown stations
    pub fn edges_from(&self, station: &str) -> &[Edge] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Station coordinates for visualization, x = longitude, y = latitude
    pub fn station_coordinates(&self) -> &HashMap<String, Point<f64>> {
        &self.coordinates
    }

    pub fn station_coordinate(&self, station: &str) -> Option<Point<f64>> {
        self.coordinates.get(station).copied()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
